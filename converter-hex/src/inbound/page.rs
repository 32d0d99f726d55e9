//! Host page: a static shell around the server-rendered widget.
//!
//! The embedded script only forwards input events to the JSON API and
//! re-renders from the returned `WidgetView`; all state lives server side.

use converter_types::{CurrencyCode, CurrencyInfo, WidgetView};

const STYLE: &str = r#"
body { margin: 0; min-height: 100vh; font-family: system-ui, sans-serif;
       background: linear-gradient(135deg, #dbeafe, #f3e8ff); }
.container { max-width: 28rem; margin: 3rem auto; padding: 1.5rem; background: #fff;
             border-radius: 0.5rem; box-shadow: 0 10px 15px rgba(0,0,0,0.1); }
h1 { text-align: center; color: #1f2937; }
label { display: block; font-size: 0.875rem; color: #374151; margin: 0.75rem 0 0.25rem; }
input, select { width: 100%; padding: 0.5rem; border: 1px solid #d1d5db; border-radius: 0.375rem;
                box-sizing: border-box; }
.swap { display: block; margin: 0.75rem auto 0; padding: 0.5rem 0.75rem; border-radius: 9999px;
        border: 1px solid #d1d5db; background: #fff; cursor: pointer; }
.result { margin-top: 1.5rem; padding: 1rem; background: #f9fafb; border-radius: 0.375rem; }
.result .value { font-size: 1.5rem; font-weight: bold; color: #1f2937; }
.spinner { margin: 1rem auto; width: 2rem; height: 2rem; border-radius: 50%;
           border-bottom: 2px solid #3b82f6; animation: spin 1s linear infinite; }
@keyframes spin { to { transform: rotate(360deg); } }
"#;

const SCRIPT: &str = r#"
const post = (path, body) => fetch(path, {
  method: 'POST',
  headers: { 'Content-Type': 'application/json' },
  body: body === undefined ? undefined : JSON.stringify(body),
}).then(r => r.json());

function render(view) {
  document.getElementById('source').value = view.source.code;
  document.getElementById('target').value = view.target.code;
  const panel = document.getElementById('panel');
  if (view.loading) {
    panel.innerHTML = '<div class="spinner"></div>';
    setTimeout(refresh, 150);
  } else if (view.display) {
    panel.innerHTML = '<div class="result"><p>Result:</p><p class="value"></p></div>';
    panel.querySelector('.value').textContent = view.display;
  } else {
    panel.innerHTML = '';
  }
}

function refresh() { fetch('/api/widget').then(r => r.json()).then(render); }

document.getElementById('amount').addEventListener('input', e =>
  post('/api/widget/amount', { amount: e.target.value }).then(render));
document.getElementById('source').addEventListener('change', e =>
  post('/api/widget/source', { currency: e.target.value }).then(render));
document.getElementById('target').addEventListener('change', e =>
  post('/api/widget/target', { currency: e.target.value }).then(render));
document.getElementById('swap').addEventListener('click', () =>
  post('/api/widget/swap').then(render));

refresh();
"#;

/// Renders the full host page for `view`.
pub fn render(view: &WidgetView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Currency Converter</title>
<style>{style}</style>
</head>
<body>
<main class="container">
<h1>Currency Converter</h1>
<label for="amount">Amount</label>
<input id="amount" type="number" min="0" step="0.01" value="{amount}" aria-label="Amount to convert" placeholder="Enter amount">
<label for="source">From</label>
<select id="source">{source}</select>
<button id="swap" class="swap" aria-label="Switch currencies">&#8646;</button>
<label for="target">To</label>
<select id="target">{target}</select>
<div id="panel">{panel}</div>
</main>
<script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        amount = escape(&view.amount),
        source = options(&view.source),
        target = options(&view.target),
        panel = result_panel(view),
        script = SCRIPT,
    )
}

fn options(selected: &CurrencyInfo) -> String {
    CurrencyCode::all()
        .iter()
        .map(|&c| {
            let marker = if c == selected.code { " selected" } else { "" };
            format!(
                r#"<option value="{code}"{marker}>{flag} {code} - {name}</option>"#,
                code = c.code(),
                flag = c.flag(),
                name = c.name(),
            )
        })
        .collect()
}

fn result_panel(view: &WidgetView) -> String {
    if view.loading {
        return r#"<div class="spinner"></div>"#.to_string();
    }
    match &view.display {
        Some(display) => format!(
            r#"<div class="result"><p>Result:</p><p class="value">{}</p></div>"#,
            escape(display)
        ),
        None => String::new(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
