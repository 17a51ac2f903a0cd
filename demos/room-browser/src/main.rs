use std::time::Duration;

use livelist::prelude::*;
use livelist::{QueuedClient, RequestQueue, RequestTask};
use serde_json::{Value, json};
use tokio::sync::oneshot;

// ---------------------------------------------------------------------------
// Scripted backend
// ---------------------------------------------------------------------------

/// Serves room pages from memory, with the same paging rules as the real
/// endpoint: `nextId` is exclusive, `count` caps the page.
struct FakeBackend {
    rooms_per_category: usize,
    latency: Duration,
}

impl FakeBackend {
    fn room(category: Category, n: usize) -> Value {
        let id = (category.index() + 1) * 1000 + n;
        json!({
            "roomName": format!("{category} room #{n}"),
            "roomId": id.to_string(),
            "thumbnail": format!("https://cdn.example/rooms/{id}.jpg"),
            "currentUsers": (n * 7) % 50,
            "owner": {
                "userId": format!("host-{id}"),
                "userName": format!("Host {n}"),
                "uid": id,
            },
        })
    }

    fn respond(&self, task: &RequestTask) -> Value {
        let Some(category) = task
            .parameters
            .get("type")
            .and_then(Value::as_str)
            .and_then(Category::from_wire)
        else {
            return json!({"code": 400, "msg": "unknown type"});
        };
        let count = task
            .parameters
            .get("count")
            .and_then(Value::as_u64)
            .unwrap_or(10) as usize;
        let all: Vec<Value> = (0..self.rooms_per_category)
            .map(|n| Self::room(category, n))
            .collect();

        let start = match task.parameters.get("nextId").and_then(Value::as_str) {
            Some(cursor) => all
                .iter()
                .position(|r| r["roomId"] == cursor)
                .map_or(all.len(), |i| i + 1),
            None => 0,
        };
        let list: Vec<Value> = all.into_iter().skip(start).take(count).collect();
        json!({"code": 0, "msg": "", "data": {"list": list}})
    }

    async fn serve(self, mut queue: RequestQueue) {
        while let Some(pending) = queue.next().await {
            tokio::time::sleep(self.latency).await;
            let body = self.respond(pending.task());
            pending.succeed(body);
        }
        tracing::info!("backend stopped");
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Runs one fetch to completion.
async fn complete(
    handle: &LiveListHandle,
    refetch: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (tx, rx) = oneshot::channel::<Result<(), FetchError>>();
    let tx = std::sync::Arc::new(std::sync::Mutex::new(Some(tx)));
    let ok_tx = std::sync::Arc::clone(&tx);
    let options = FetchOptions::new()
        .on_success(move || {
            if let Some(tx) = ok_tx.lock().ok().and_then(|mut t| t.take()) {
                let _ = tx.send(Ok(()));
            }
        })
        .on_failure(move |e| {
            if let Some(tx) = tx.lock().ok().and_then(|mut t| t.take()) {
                let _ = tx.send(Err(e));
            }
        });

    let outcome = if refetch {
        handle.refetch(options).await?
    } else {
        handle.fetch_next_page(options.count(5)).await?
    };
    if outcome == FetchOutcome::Skipped {
        return Ok(());
    }
    rx.await??;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    livelist::init_tracing();

    let (client, queue) = QueuedClient::new();
    let backend = FakeBackend {
        rooms_per_category: 23,
        latency: Duration::from_millis(20),
    };
    let server = tokio::spawn(backend.serve(queue));

    let handle = LiveListVm::builder()
        .spawn(client, StaticToken::new("demo-token"));
    let presenting = handle.subscribe().await?;

    for category in [Category::Multi, Category::Pk, Category::Shopping] {
        handle.set_active(category).await?;
        complete(&handle, true).await?;
        complete(&handle, false).await?;
        complete(&handle, false).await?;

        let rooms = presenting.borrow().clone();
        tracing::info!(
            %category,
            rooms = rooms.len(),
            first = rooms.first().map(Room::name).unwrap_or_default(),
            last = rooms.last().map(Room::name).unwrap_or_default(),
            "category loaded"
        );
    }

    // Refreshing keeps everything that is on screen.
    handle.set_active(Category::Multi).await?;
    complete(&handle, true).await?;
    tracing::info!(
        rooms = presenting.borrow().len(),
        "multi refreshed"
    );

    handle.shutdown().await?;
    drop(handle);
    server.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend() -> FakeBackend {
        FakeBackend {
            rooms_per_category: 12,
            latency: Duration::ZERO,
        }
    }

    fn ids(body: &Value) -> Vec<String> {
        body["data"]["list"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["roomId"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_first_page_starts_at_beginning() {
        let task = RequestTask::get("room-page-refetch", "/")
            .param("count", 3)
            .param("type", Category::Pk.wire_value());
        assert_eq!(ids(&backend().respond(&task)), ["3000", "3001", "3002"]);
    }

    #[test]
    fn test_next_page_starts_after_cursor() {
        let task = RequestTask::get("room-page", "/")
            .param("count", 2)
            .param("nextId", "1010")
            .param("type", Category::Multi.wire_value());
        assert_eq!(ids(&backend().respond(&task)), ["1011"]);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let task = RequestTask::get("room-page", "/").param("type", "9");
        assert_eq!(backend().respond(&task)["code"], 400);
    }

    #[tokio::test]
    async fn test_demo_flow_fills_presenting_list() {
        let (client, queue) = QueuedClient::new();
        tokio::spawn(backend().serve(queue));
        let handle = LiveListVm::builder()
            .initial_category(Category::Virtual)
            .spawn(client, StaticToken::new("t"));

        complete(&handle, false).await.unwrap();
        assert!(handle.presenting().await.unwrap().is_empty());

        complete(&handle, true).await.unwrap();
        complete(&handle, false).await.unwrap();
        assert_eq!(handle.presenting().await.unwrap().len(), 12);
    }
}
