//! GET /: single-page chat widget.

use std::sync::Arc;

use axum::{extract::State, response::Html};

use crate::app::app_state::AppState;

const PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>{{TITLE}}</title>
  <style>
    body { font-family: Georgia, serif; max-width: 1000px; margin: 2rem auto; color: #1d1d1f; line-height: 1.6; }
    .header { text-align: center; padding: 1rem; }
    .card { border: 1px solid #ddd; padding: 1rem; border-radius: 8px; margin-bottom: 1rem; }
    .status { white-space: pre-wrap; padding: 10px; border-radius: 5px; font-family: monospace; }
    .status-success { background: #d4edda; border: 1px solid #c3e6cb; color: #155724; }
    .status-error { background: #f8d7da; border: 1px solid #f5c6cb; color: #721c24; }
    .status-warning { background: #fff3cd; border: 1px solid #ffeaa7; color: #856404; }
    #log { height: 420px; overflow-y: auto; }
    .msg { margin: 0.5rem 0; padding: 0.5rem 0.75rem; border-radius: 6px; white-space: pre-wrap; }
    .user { background: #eef3fb; }
    .bot { background: #f6f6f4; }
    .sources { margin: -0.25rem 0 0.5rem 1rem; font-size: 0.85rem; color: #555; }
    .starters button { margin: 0.25rem; }
    input { width: 80%; padding: 0.5rem; }
    button { padding: 0.5rem 1rem; }
    .disabled { text-align: center; padding: 2rem; background: #f8d7da; border-radius: 10px; }
    .tips { text-align: center; color: #666; background: #f8f9fa; padding: 1rem; border-radius: 5px; }
  </style>
</head>
<body>
  <div class="header">
    <h1>📚 {{TITLE}}</h1>
    <p><em>"{{DESCRIPTION}}"</em></p>
  </div>

  <div class="card">
    <strong>📡 Collection Status</strong>
    <div id="status" class="status">Loading...</div>
    <button id="refreshBtn">🔄 Refresh Status</button>
    <button id="testBtn">🧪 Test Search</button>
  </div>

  <div id="chat" class="card" {{CHAT_HIDDEN}}>
    <div id="log"><div class="msg bot"><em>Welcome to the infinite library. What would you like to explore?</em></div></div>
    <div class="starters" id="starters"></div>
    <input id="question" placeholder="Ask me about Borges' labyrinths, mirrors, infinite libraries, or any aspect of his work..." />
    <button id="sendBtn">📤 Send</button>
    <button id="clearBtn">🗑️ Clear</button>
  </div>

  <div class="disabled" {{DISABLED_HIDDEN}}>
    <h3>❌ System Not Available</h3>
    <p>The chat interface is not available because the vector store connection could not be established.</p>
    <p>Please check the status above and ensure your Qdrant server is running.</p>
  </div>

  <details class="card">
    <summary>🔧 System Configuration</summary>
    <pre id="config"></pre>
  </details>

  <div class="tips">
    <p><strong>💡 Tips for better conversations:</strong></p>
    <p>• Ask about specific stories, themes, or literary techniques</p>
    <p>• Reference characters or concepts from Borges' works</p>
    <p>• Explore connections between different stories</p>
    <p>• Inquire about philosophical themes like infinity, time, and identity</p>
  </div>

  <script>
    const statusBox = document.getElementById('status');
    const log = document.getElementById('log');
    const question = document.getElementById('question');

    function showStatus(report) {
      statusBox.textContent = report.message;
      statusBox.className = 'status status-' + report.status_type;
    }

    function append(cls, text) {
      const div = document.createElement('div');
      div.className = 'msg ' + cls;
      div.textContent = text;
      log.appendChild(div);
      log.scrollTop = log.scrollHeight;
    }

    function showSources(sources) {
      if (!sources || sources.length === 0) return;
      const list = document.createElement('ol');
      list.className = 'sources';
      sources.forEach(src => {
        const li = document.createElement('li');
        li.textContent = src.citation + ' (relevance ' + src.score.toFixed(3) + ')';
        li.title = src.content_preview;
        list.appendChild(li);
      });
      log.appendChild(list);
      log.scrollTop = log.scrollHeight;
    }

    async function refresh() {
      const res = await fetch('/api/status');
      showStatus(await res.json());
    }

    async function testSearch() {
      statusBox.textContent = 'Searching...';
      const res = await fetch('/api/search-test', { method: 'POST' });
      showStatus(await res.json());
    }

    async function send(text) {
      const message = (text ?? question.value).trim();
      if (!message) return;
      question.value = '';
      append('user', message);
      try {
        const res = await fetch('/api/chat', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ message })
        });
        const data = await res.json();
        append('bot', data.reply ?? (data.error && data.error.message) ?? 'Unexpected response');
        showSources(data.result && data.result.sources);
      } catch (err) {
        append('bot', "I'm sorry, but I encountered an unexpected error. Please try again.");
      }
    }

    async function loadStarters() {
      const res = await fetch('/api/starters');
      const data = await res.json();
      const box = document.getElementById('starters');
      data.starters.forEach(q => {
        const b = document.createElement('button');
        b.textContent = q;
        b.onclick = () => send(q);
        box.appendChild(b);
      });
    }

    async function loadConfig() {
      const res = await fetch('/api/config');
      const c = await res.json();
      document.getElementById('config').textContent =
        'Qdrant Configuration:\n' +
        '• URL: ' + c.qdrant_url + '\n' +
        '• Collection: ' + c.collection + '\n' +
        '• Embedding Model: ' + c.embedding_model + '\n' +
        '• LLM Model: ' + c.llm_model + '\n' +
        '• Retrieval: Top-' + c.top_k + ', Threshold: ' + c.score_threshold;
    }

    document.getElementById('refreshBtn').onclick = refresh;
    document.getElementById('testBtn').onclick = testSearch;
    document.getElementById('sendBtn').onclick = () => send();
    document.getElementById('clearBtn').onclick = () => { log.innerHTML = ''; };
    question.addEventListener('keydown', e => { if (e.key === 'Enter') send(); });

    refresh();
    loadStarters();
    loadConfig();
  </script>
</body>
</html>
"#;

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_page(
        &state.config.title,
        &state.config.description,
        state.is_ready(),
    ))
}

pub fn render_page(title: &str, description: &str, ready: bool) -> String {
    let (chat_hidden, disabled_hidden) = if ready { ("", "hidden") } else { ("hidden", "") };
    PAGE.replace("{{TITLE}}", &escape_html(title))
        .replace("{{DESCRIPTION}}", &escape_html(description))
        .replace("{{CHAT_HIDDEN}}", chat_hidden)
        .replace("{{DISABLED_HIDDEN}}", disabled_hidden)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
