use crate::model::ChartSpec;

/// Render a self-contained HTML page drawing one chart (data embedded as JSON).
///
/// Important: we avoid `format!()` because the page contains many `{}` from JS
/// template literals (e.g., `${x}`), which would conflict with Rust formatting.
pub fn render_chart_page(chart: &ChartSpec) -> anyhow::Result<String> {
    // "</" inside a string literal would terminate the <script> element early.
    let json = serde_json::to_string(chart)?.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>runlab chart</title>
<style>
  body { margin: 0; background: white; }
  svg text { fill: #222; }
  .grid { stroke: #eee; }
  .axis { stroke: #444; }
</style>
</head>
<body>
<svg id="chart" xmlns="http://www.w3.org/2000/svg"></svg>

<script>
// Embedded chart spec (JSON object literal)
const CHART = __DATA__;

const NS = "http://www.w3.org/2000/svg";
const M = { top: 56, right: 80, bottom: 56, left: 80 };

function el(name, attrs, text) {
  const e = document.createElementNS(NS, name);
  for (const [k, v] of Object.entries(attrs)) e.setAttribute(k, v);
  if (text !== undefined) e.textContent = text;
  return e;
}

function extent(series, pick) {
  let lo = Infinity, hi = -Infinity;
  for (const s of series) {
    for (const p of s.points) {
      lo = Math.min(lo, pick(p));
      hi = Math.max(hi, pick(p));
    }
  }
  if (!isFinite(lo)) return { min: 0, max: 1 };
  if (lo === hi) return { min: lo - 1, max: hi + 1 };
  const pad = (hi - lo) * 0.05;
  return { min: lo - pad, max: hi + pad };
}

function ticks(range, count) {
  const out = [];
  const step = (range.max - range.min) / count;
  for (let i = 0; i <= count; i++) out.push(range.min + i * step);
  return out;
}

function fmt(x) {
  const a = Math.abs(x);
  if (a >= 1000) return x.toFixed(0);
  if (a >= 10) return x.toFixed(1);
  return x.toFixed(2);
}

function draw() {
  const c = CHART;
  const svg = document.getElementById("chart");
  svg.setAttribute("width", c.width);
  svg.setAttribute("height", c.height);
  svg.style.fontFamily = c.font_family;
  svg.style.fontSize = c.font_size + "px";

  const primary = c.series.filter(s => s.axis === "primary");
  const secondary = c.series.filter(s => s.axis === "secondary");

  const xr = c.x_range || extent(c.series, p => p[0]);
  const yr = c.y_range || extent(primary, p => p[1]);
  const y2r = c.y2_range || extent(secondary, p => p[1]);

  const w = c.width - M.left - M.right;
  const h = c.height - M.top - M.bottom;
  const sx = x => M.left + (x - xr.min) / (xr.max - xr.min) * w;
  const sy = (y, r) => M.top + h - (y - r.min) / (r.max - r.min) * h;

  const clip = el("clipPath", { id: "plot" });
  clip.appendChild(el("rect", { x: M.left, y: M.top, width: w, height: h }));
  svg.appendChild(clip);

  for (const t of ticks(xr, 10)) {
    svg.appendChild(el("line", { class: "grid", x1: sx(t), x2: sx(t), y1: M.top, y2: M.top + h }));
    svg.appendChild(el("text", { x: sx(t), y: M.top + h + 20, "text-anchor": "middle" }, fmt(t)));
  }
  const leftColor = primary.length ? primary[0].color : "#222";
  for (const t of ticks(yr, 8)) {
    svg.appendChild(el("line", { class: "grid", x1: M.left, x2: M.left + w, y1: sy(t, yr), y2: sy(t, yr) }));
    svg.appendChild(el("text", { x: M.left - 8, y: sy(t, yr) + 4, "text-anchor": "end", fill: leftColor }, fmt(t)));
  }
  if (secondary.length) {
    for (const t of ticks(y2r, 8)) {
      svg.appendChild(el("text", { x: M.left + w + 8, y: sy(t, y2r) + 4, fill: secondary[0].color }, fmt(t)));
    }
  }

  svg.appendChild(el("rect", { class: "axis", x: M.left, y: M.top, width: w, height: h, fill: "none" }));
  svg.appendChild(el("text", { x: c.width / 2, y: 32, "text-anchor": "middle", "font-weight": "500" }, c.title));
  svg.appendChild(el("text", { x: c.width / 2, y: c.height - 12, "text-anchor": "middle" }, c.x_label));

  c.series.forEach((s, i) => {
    const r = s.axis === "secondary" ? y2r : yr;
    const d = s.points.map((p, j) => (j ? "L" : "M") + sx(p[0]) + "," + sy(p[1], r)).join(" ");
    svg.appendChild(el("path", { d, fill: "none", stroke: s.color, "stroke-width": 2, "clip-path": "url(#plot)" }));

    const ly = M.top + 20 + i * 22;
    svg.appendChild(el("line", { x1: M.left + 12, x2: M.left + 40, y1: ly - 5, y2: ly - 5, stroke: s.color, "stroke-width": 3 }));
    svg.appendChild(el("text", { x: M.left + 48, y: ly }, s.label));
  });
}

draw();
</script>
</body>
</html>
"##;

    Ok(TEMPLATE.replace("__DATA__", &json))
}
