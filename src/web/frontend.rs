//! Embedded HTML/CSS/JS frontend for the phishscan browser surface.
//!
//! The page holds no logic of its own: it posts form submissions and
//! clear-history clicks to the JSON API and draws whatever view state comes
//! back. No external assets, no build tools, no CDN dependencies.

/// The complete single-page scanner HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>phishscan</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app { max-width: 720px; margin: 0 auto; padding: 24px; }

header {
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 24px; font-weight: 600; }
header p { color: var(--text-muted); }

.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 20px;
  margin-bottom: 16px;
}

form { display: flex; gap: 8px; }
form input {
  flex: 1;
  padding: 10px 12px;
  border: 1px solid var(--border);
  border-radius: 6px;
  background: var(--bg);
  color: var(--text);
  font-family: var(--mono);
}
button {
  padding: 10px 16px;
  border: none;
  border-radius: 6px;
  background: var(--accent);
  color: #fff;
  font-weight: 500;
  cursor: pointer;
}
button:disabled { opacity: 0.5; cursor: default; }
button.secondary { background: transparent; border: 1px solid var(--border); color: var(--text-muted); }

#error {
  display: none;
  border-color: var(--red);
  color: var(--red);
}

#result { display: none; }
.result-card.phishing { border-color: var(--red); }
.result-card.safe { border-color: var(--green); }
.result-head { display: flex; align-items: center; gap: 10px; font-size: 18px; font-weight: 600; }
.result-url { color: var(--text-muted); font-family: var(--mono); word-break: break-all; margin: 8px 0; }
.result-note { color: var(--accent); margin-top: 8px; }

.probability { display: flex; align-items: center; gap: 12px; }
.probability-bar { flex: 1; height: 10px; background: var(--bg); border-radius: 5px; overflow: hidden; }
.probability-fill { height: 100%; transition: width 0.3s; }
.probability-fill.danger { background: var(--red); }
.probability-fill.safe { background: var(--green); }
.probability-value { font-family: var(--mono); min-width: 56px; text-align: right; }

#historySection { display: none; }
.history-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 12px; }
.history-header h2 { font-size: 16px; font-weight: 600; }
.history-item {
  display: flex;
  gap: 12px;
  padding: 10px 0;
  border-top: 1px solid var(--border);
}
.history-url { font-family: var(--mono); word-break: break-all; }
.history-meta { display: flex; gap: 12px; color: var(--text-muted); font-size: 12px; }
.history-item.phishing .history-status { color: var(--red); }
.history-item.safe .history-status { color: var(--green); }
</style>
</head>
<body>
<div class="app">
  <header>
    <h1>phishscan</h1>
    <p>Check a URL against the phishing classifier.</p>
  </header>

  <div class="card">
    <form id="scanForm">
      <input id="urlInput" type="text" placeholder="https://example.com" autocomplete="off">
      <button id="scanButton" type="submit"><span id="buttonText">🔍 Scan URL</span></button>
    </form>
  </div>

  <div id="error" class="card"></div>

  <div id="result" class="card result-card">
    <div class="result-head"><span id="resultIcon"></span><span id="resultTitle"></span></div>
    <p id="resultUrl" class="result-url"></p>
    <div class="probability">
      <div class="probability-bar"><div id="probabilityFill" class="probability-fill"></div></div>
      <span id="probabilityValue" class="probability-value"></span>
    </div>
    <p id="resultNote" class="result-note"></p>
  </div>

  <div id="historySection" class="card">
    <div class="history-header">
      <h2>Scan History</h2>
      <button id="clearHistory" class="secondary" type="button">Clear</button>
    </div>
    <div id="historyList"></div>
  </div>
</div>

<script>
const $ = (id) => document.getElementById(id);
const LOST_CONNECTION = 'Lost connection to phishscan.';

async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const res = await fetch(path, opts);
  if (!res.ok) throw new Error('HTTP ' + res.status);
  return res.json();
}

function connectionLost() {
  renderError(LOST_CONNECTION);
  setLoading(false, '🔍 Scan URL');
}

function setLoading(loading, label) {
  $('scanButton').disabled = loading;
  $('urlInput').disabled = loading;
  $('buttonText').textContent = label;
}

function renderError(message) {
  $('error').textContent = message || '';
  $('error').style.display = message ? 'block' : 'none';
}

function renderResult(view) {
  if (!view) {
    $('result').style.display = 'none';
    return;
  }
  $('resultIcon').textContent = view.icon;
  $('resultTitle').textContent = view.title;
  $('resultUrl').textContent = view.url;
  $('probabilityFill').style.width = view.fill_pct + '%';
  $('probabilityFill').className = 'probability-fill ' + view.fill_class;
  $('probabilityValue').textContent = view.probability_text;
  $('resultNote').textContent = view.note || '';
  $('result').className = 'card result-card ' + view.card_class;
  $('result').style.display = 'block';
}

function historyRow(item) {
  const row = document.createElement('div');
  row.className = 'history-item ' + item.class;

  const icon = document.createElement('div');
  icon.textContent = item.icon;

  const content = document.createElement('div');
  const url = document.createElement('p');
  url.className = 'history-url';
  url.textContent = item.url;

  const meta = document.createElement('div');
  meta.className = 'history-meta';
  for (const [cls, text] of [
    ['history-status', item.status],
    ['history-probability', item.confidence + ' confidence'],
    ['history-time', item.timestamp],
  ]) {
    const span = document.createElement('span');
    span.className = cls;
    span.textContent = text;
    meta.appendChild(span);
  }

  content.append(url, meta);
  row.append(icon, content);
  return row;
}

function renderHistory(items) {
  if (!items) {
    $('historySection').style.display = 'none';
    return;
  }
  $('historyList').replaceChildren(...items.map(historyRow));
  $('historySection').style.display = 'block';
}

function render(state) {
  setLoading(state.loading, state.button_label);
  renderError(state.error);
  renderResult(state.result);
  renderHistory(state.history);
}

$('scanForm').addEventListener('submit', async (e) => {
  e.preventDefault();
  const url = $('urlInput').value.trim();
  if (!url) return;

  setLoading(true, '⚡ Scanning...');
  renderError(null);
  renderResult(null);
  try {
    render(await api('POST', '/api/scan', { url }));
  } catch (err) {
    connectionLost();
  } finally {
    $('urlInput').value = '';
  }
});

$('clearHistory').addEventListener('click', async () => {
  try {
    render(await api('POST', '/api/history/clear'));
  } catch (err) {
    connectionLost();
  }
});

api('GET', '/api/state').then(render).catch(connectionLost);
</script>
</body>
</html>
"##;
