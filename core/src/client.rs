use thiserror::Error;

use crate::task::{Tab, TaskUpdate, TasksPage};

const BODY_PREVIEW_LIMIT: usize = 512;

/// Failure talking to the tasks API. Transport problems keep the reqwest
/// error as their source; non-2xx and undecodable responses carry a
/// preview of what the server actually sent.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned status {status}: {body}")]
    Status { status: u16, url: String, body: String },
    #[error("bad response body from {url} (status {status}): {source}, body: {body}")]
    Decode {
        status: u16,
        url: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            ApiError::Status { status, .. } | ApiError::Decode { status, .. } => Some(*status),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ApiError::Transport { url, .. }
            | ApiError::Status { url, .. }
            | ApiError::Decode { url, .. } => url,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Transport { source, .. } if source.is_timeout())
    }

    fn transport(err: reqwest::Error, url: String) -> Self {
        ApiError::Transport { url, source: err }
    }
}

fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    match trimmed.char_indices().nth(BODY_PREVIEW_LIMIT) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

async fn ensure_success(resp: reqwest::Response) -> anyhow::Result<()> {
    let status = resp.status();
    let url = resp.url().to_string();

    if status.is_success() {
        return Ok(());
    }

    let body = resp
        .text()
        .await
        .map_err(|err| ApiError::transport(err, url.clone()))?;
    Err(ApiError::Status {
        status: status.as_u16(),
        url,
        body: preview_body(&body),
    }
    .into())
}

async fn parse_page(resp: reqwest::Response) -> anyhow::Result<TasksPage> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| ApiError::transport(err, url.clone()))?;

    if !status.is_success() {
        return Err(ApiError::Status {
            status: status.as_u16(),
            url,
            body: preview_body(&body),
        }
        .into());
    }

    serde_json::from_str::<TasksPage>(&body).map_err(|err| {
        ApiError::Decode {
            status: status.as_u16(),
            url,
            body: preview_body(&body),
            source: err,
        }
        .into()
    })
}

/// Client for the task-tracking backend: paginated task queries by status
/// and partial task mutations.
#[derive(Clone)]
pub struct TasksClient {
    api_key: String,
    http: reqwest::Client,
    // Pre-built endpoint root (avoid repeated format! and trim)
    url_tasks: String,
}

impl TasksClient {
    pub fn new(base_url: &str, api_key: String, timeout_ms: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(timeout_ms))
            .build()?;
        let normalized = base_url.trim_end_matches('/');
        Ok(Self {
            api_key,
            http,
            url_tasks: format!("{}/tasks", normalized),
        })
    }

    fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.trim().is_empty() {
            req
        } else {
            req.bearer_auth(&self.api_key)
        }
    }

    /// Fetch one page of tasks for a status tab. An empty `cursor` starts
    /// from the beginning and is omitted from the query string.
    pub async fn fetch_tasks(&self, tab: Tab, cursor: &str, size: u32) -> anyhow::Result<TasksPage> {
        let url = &self.url_tasks;
        tracing::debug!(
            target: "taskboard.http",
            stage = "tasks.fetch.in",
            url = %url,
            status = tab.as_str(),
            cursor = cursor,
            size = size
        );
        let size = size.to_string();
        let mut params: Vec<(&str, &str)> = vec![("status", tab.as_str()), ("size", &size)];
        if !cursor.is_empty() {
            params.push(("next", cursor));
        }
        let req = self.http.get(url).query(&params);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ApiError::transport(err, url.clone()))?;
        let status = resp.status();
        let page = parse_page(resp).await?;
        tracing::debug!(
            target: "taskboard.http",
            stage = "tasks.fetch.out",
            status = %status,
            tasks = page.tasks.len(),
            has_next = !page.next.is_empty()
        );
        Ok(page)
    }

    /// Apply a partial update to a single task. The response body is
    /// ignored; only success/failure is reported.
    pub async fn update_task(&self, id: &str, update: &TaskUpdate) -> anyhow::Result<()> {
        let url = format!("{}/{}", self.url_tasks, id);
        tracing::debug!(
            target: "taskboard.http",
            stage = "tasks.update.in",
            url = %url,
            task_id = id,
            has_assignee = update.assignee.is_some(),
            has_status = update.status.is_some(),
            has_ends_on = update.ends_on.is_some()
        );
        let req = self.http.patch(&url).json(update);
        let resp = self
            .auth(req)
            .send()
            .await
            .map_err(|err| ApiError::transport(err, url.clone()))?;
        let status = resp.status();
        ensure_success(resp).await?;
        tracing::debug!(target: "taskboard.http", stage = "tasks.update.out", status = %status);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;
    use mockito::Matcher;
    use mockito::Server;

    #[test]
    fn test_preview_body_empty() {
        assert_eq!(preview_body("   "), "<empty body>");
    }

    #[test]
    fn test_preview_body_truncates() {
        let body = "a".repeat(BODY_PREVIEW_LIMIT + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert!(preview.len() <= BODY_PREVIEW_LIMIT + 3);
    }

    #[test]
    fn test_api_error_display_status() {
        let err = ApiError::Status {
            status: 502,
            url: "https://example.com/tasks".to_string(),
            body: "bad gateway".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("502"));
        assert!(msg.contains("https://example.com/tasks"));
        assert!(msg.contains("bad gateway"));
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn test_fetch_tasks_parses_page() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("status".into(), "AVAILABLE".into()),
                Matcher::UrlEncoded("size".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tasks":[{"id":"t1","title":"Fix login","status":"AVAILABLE"}],"next":"cursor-2"}"#)
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        let page = client.fetch_tasks(Tab::Available, "", 10).await.unwrap();
        assert_eq!(page.tasks.len(), 1);
        assert_eq!(page.tasks[0].id, "t1");
        assert_eq!(page.next, "cursor-2");
    }

    #[tokio::test]
    async fn test_fetch_tasks_omits_next_when_cursor_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::Exact("status=MERGED&size=5".to_string()))
            .with_status(200)
            .with_body(r#"{"tasks":[],"next":""}"#)
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        let page = client.fetch_tasks(Tab::Merged, "", 5).await.unwrap();
        assert!(page.tasks.is_empty());
        assert!(page.next.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_tasks_passes_cursor() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("status".into(), "IN_PROGRESS".into()),
                Matcher::UrlEncoded("next".into(), "abc123".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"tasks":[],"next":""}"#)
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        client
            .fetch_tasks(Tab::InProgress, "abc123", 10)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_fetch_tasks_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        let err = client
            .fetch_tasks(Tab::Available, "", 10)
            .await
            .unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().expect("expected ApiError");
        assert!(matches!(api_err, ApiError::Status { .. }));
        assert_eq!(api_err.status(), Some(503));
        assert!(api_err.url().contains("/tasks"));
    }

    #[tokio::test]
    async fn test_fetch_tasks_decode_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        let err = client
            .fetch_tasks(Tab::Available, "", 10)
            .await
            .unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().expect("expected ApiError");
        assert!(matches!(api_err, ApiError::Decode { .. }));
        assert_eq!(api_err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_update_task_sends_only_present_fields() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PATCH", "/tasks/t42")
            .match_body(Matcher::Json(serde_json::json!({"assignee": "joy"})))
            .with_status(204)
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        let update = TaskUpdate {
            assignee: Some("joy".to_string()),
            ..TaskUpdate::default()
        };
        client.update_task("t42", &update).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_task_status_and_due_date() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PATCH", "/tasks/t42")
            .match_body(Matcher::Json(serde_json::json!({
                "status": "IN_PROGRESS",
                "ends_on": "2020-05-12"
            })))
            .with_status(204)
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        let update = TaskUpdate {
            status: Some(TaskStatus::InProgress),
            ends_on: chrono::NaiveDate::from_ymd_opt(2020, 5, 12),
            ..TaskUpdate::default()
        };
        client.update_task("t42", &update).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_task_status_error() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("PATCH", "/tasks/t42")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        let err = client
            .update_task("t42", &TaskUpdate::default())
            .await
            .unwrap_err();
        let api_err = err.downcast_ref::<ApiError>().expect("expected ApiError");
        assert!(matches!(api_err, ApiError::Status { .. }));
        assert_eq!(api_err.status(), Some(502));
    }

    #[tokio::test]
    async fn test_auth_header_included_when_api_key_set() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::Any)
            .match_header("authorization", "Bearer secret-token")
            .with_status(200)
            .with_body(r#"{"tasks":[],"next":""}"#)
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "secret-token".to_string(), 1_000).unwrap();
        client.fetch_tasks(Tab::Available, "", 10).await.unwrap();
    }

    #[tokio::test]
    async fn test_auth_header_absent_when_api_key_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/tasks")
            .match_query(Matcher::Any)
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body(r#"{"tasks":[],"next":""}"#)
            .create_async()
            .await;

        let client = TasksClient::new(&server.url(), "".to_string(), 1_000).unwrap();
        client.fetch_tasks(Tab::Available, "", 10).await.unwrap();
    }
}
