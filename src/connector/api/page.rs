use axum::response::Html;

/// `GET /` — a minimal single-page client over the two API endpoints.
/// Mirrors the session contract: busy flag while a request is in flight,
/// append-only message list, clickable source attributions.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>sourcechat</title>
<style>
  body { font-family: sans-serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }
  .message { padding: 0.75rem; border-radius: 0.5rem; margin-bottom: 0.75rem; }
  .user { background: #dbeafe; }
  .assistant { background: #f3f4f6; }
  .sources { margin-top: 0.5rem; font-size: 0.85rem; color: #4b5563; }
  textarea, input[type=text] { width: 100%; padding: 0.5rem; margin-bottom: 0.5rem; box-sizing: border-box; }
  button { padding: 0.5rem 1rem; }
  button:disabled { opacity: 0.5; }
</style>
</head>
<body>
<h1>sourcechat</h1>
<form id="url-form">
  <textarea id="urls" rows="3" placeholder="Paste URLs (one per line)"></textarea>
  <button type="submit">Process URLs</button>
</form>
<div id="messages"></div>
<form id="chat-form">
  <input type="text" id="input" placeholder="Ask a question...">
  <button type="submit">Send</button>
</form>
<script>
const messages = [];
let busy = false;

function render() {
  const container = document.getElementById("messages");
  container.innerHTML = "";
  for (const message of messages) {
    const div = document.createElement("div");
    div.className = "message " + message.role;
    const p = document.createElement("p");
    p.textContent = message.content;
    div.appendChild(p);
    if (message.sources && message.sources.length > 0) {
      const sources = document.createElement("div");
      sources.className = "sources";
      sources.textContent = "Sources:";
      const list = document.createElement("ul");
      for (const source of message.sources) {
        const item = document.createElement("li");
        const link = document.createElement("a");
        link.href = source;
        link.target = "_blank";
        link.rel = "noopener noreferrer";
        link.textContent = source;
        item.appendChild(link);
        list.appendChild(item);
      }
      sources.appendChild(list);
      div.appendChild(sources);
    }
    container.appendChild(div);
  }
}

document.getElementById("url-form").addEventListener("submit", async (e) => {
  e.preventDefault();
  if (busy) return;
  const urls = document.getElementById("urls").value
    .split("\n").map(u => u.trim()).filter(u => u.length > 0);
  if (urls.length === 0) return;
  busy = true;
  try {
    const response = await fetch("/api/process-urls", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ urls }),
    });
    const data = await response.json();
    if (response.ok) {
      messages.push({ role: "assistant", content: data.summary, sources: urls });
      document.getElementById("urls").value = "";
      render();
    }
  } catch (error) {
    console.error("Error processing URLs:", error);
  } finally {
    busy = false;
  }
});

document.getElementById("chat-form").addEventListener("submit", async (e) => {
  e.preventDefault();
  if (busy) return;
  const input = document.getElementById("input").value.trim();
  if (!input) return;
  messages.push({ role: "user", content: input });
  document.getElementById("input").value = "";
  render();
  busy = true;
  try {
    const response = await fetch("/api/chat", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ messages }),
    });
    const data = await response.json();
    if (response.ok) {
      messages.push({ role: "assistant", content: data.content, sources: data.sources });
      render();
    }
  } catch (error) {
    console.error("Error sending message:", error);
  } finally {
    busy = false;
  }
});
</script>
</body>
</html>
"#;
