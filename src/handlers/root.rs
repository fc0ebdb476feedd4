use crate::app_state::AppState;
use axum::{extract::State, response::Html};

/// GET /
///
/// Landing page showing how to post a paste from the command line.
pub async fn root_handler(State(state): State<AppState>) -> Html<String> {
    // ---
    let version = env!("CARGO_PKG_VERSION");
    let base = state.public_url();

    Html(format!(
        r#"<!DOCTYPE html>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>pastebook {version}</title>
<pre>cat main.rs | curl --data-binary @- {base}

curl -X POST {base}/accounts -d '{{"email":"you@example.com","password":"..."}}'
curl -X POST {base}/token    -d '{{"email":"you@example.com","password":"..."}}'

curl -H "Auth: $TOKEN" -X PUT --data-binary @notes.txt {base}/bookmarks/notes
curl -H "Auth: $TOKEN" {base}/bookmarks/notes
curl -H "Auth: $TOKEN" {base}/bookmarks/notes/history
curl -H "Auth: $TOKEN" {base}/bookmarks</pre>
"#
    ))
}
