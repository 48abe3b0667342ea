use reqwest::{Client, RequestBuilder};
use serde_json::Value;

fn authorize(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Call `search_movies` for each title on the root JSON-RPC route.
pub async fn run(server_url: &str, token: &str, titles: &[String]) -> anyhow::Result<()> {
    let client = Client::new();

    for (id, title) in (1u64..).zip(titles) {
        tracing::info!("Calling search_movies for '{title}'");

        let resp = client
            .post(server_url)
            .bearer_auth(token)
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": "tools/call",
                "params": {
                    "name": "search_movies",
                    "arguments": {
                        "query": title
                    }
                }
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            anyhow::bail!("Tool call failed with {status}: {body}");
        }

        let body: Value = resp.json().await?;
        print_envelope(&body)?;
    }

    Ok(())
}

/// List tools through the MCP endpoint.
pub async fn list_tools(server_url: &str, token: Option<&str>) -> anyhow::Result<()> {
    let url = format!("{}/mcp", server_url.trim_end_matches('/'));
    let request = Client::new().post(url).json(&serde_json::json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "tools/list",
        "params": {}
    }));

    let body: Value = authorize(request, token)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    print_envelope(&body)
}

fn print_envelope(body: &Value) -> anyhow::Result<()> {
    if let Some(result) = body.get("result") {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else if let Some(error) = body.get("error") {
        eprintln!("Error: {}", serde_json::to_string_pretty(error)?);
    }
    Ok(())
}
