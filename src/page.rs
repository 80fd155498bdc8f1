use crate::manager_report::models::{ChartItem, PageContext};

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Escapes text for use in html content and attribute values
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn checked(on: bool) -> &'static str {
    if on { " checked" } else { "" }
}

fn selected(on: bool) -> &'static str {
    if on { " selected" } else { "" }
}

/// Renders the forecast page.
///
/// The table shows the filtered rows while the chart is fed the full series as json.
///
/// # Arguments
///
/// * 'context' - page context from the report
pub fn render(context: &PageContext) -> Result<String, serde_json::Error> {
    // no raw '<' inside the script block
    let chart = serde_json::to_string(&context.chart)?.replace('<', "\\u003c");
    let graph_items = serde_json::to_string(&context.graph_items)?;

    let mut html = String::new();
    html.push_str(&format!(r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<title>{job} - 작업 가능 여부</title>
<script src="{chart_js}"></script>
<style>
body {{ font-family: sans-serif; margin: 2em; }}
table {{ border-collapse: collapse; }}
th, td {{ border: 1px solid #ccc; padding: 4px 8px; text-align: right; }}
td:first-child, td:last-child {{ text-align: left; }}
</style>
</head>
<body>
<h1>{job} 작업 가능 여부 ({location})</h1>
<form method="post" action="/">
"#,
        job = escape(context.job_name),
        chart_js = CHART_JS,
        location = escape(&context.location),
    ));

    html.push_str("<label>작업 <select name=\"job_type\">\n");
    for option in &context.job_options {
        html.push_str(&format!("<option value=\"{}\"{}>{}</option>\n",
                               option.key, selected(option.key == context.job_key), escape(option.label)));
    }
    html.push_str("</select></label>\n");

    html.push_str("<label>필터 <select name=\"filter\">\n");
    let current = context.filter.unwrap_or("");
    for (value, label) in [("", "전체"), ("ok", "작업 가능"), ("warning", "작업 금지"), ("caution", "주의")] {
        html.push_str(&format!("<option value=\"{}\"{}>{}</option>\n", value, selected(current == value), label));
    }
    html.push_str("</select></label>\n");

    for item in ChartItem::ALL {
        html.push_str(&format!("<label><input type=\"checkbox\" name=\"graph_items\" value=\"{key}\"{on}>{key}</label>\n",
                               key = item.key(), on = checked(context.graph_items.contains(&item.key()))));
    }

    html.push_str(&format!(r#"<label>시작 <input type="date" name="start_date" value="{start}"></label>
<label>종료 <input type="date" name="end_date" value="{end}"></label>
<label>위도 <input type="text" name="lat" size="8" value="{lat}"></label>
<label>경도 <input type="text" name="lon" size="8" value="{lon}"></label>
"#,
        start = escape(&context.start_date),
        end = escape(&context.end_date),
        lat = context.lat.map(|v| v.to_string()).unwrap_or_default(),
        lon = context.lon.map(|v| v.to_string()).unwrap_or_default(),
    ));

    html.push_str("<label>용접 방식 <select name=\"welding_method\">\n");
    let method = context.welding_method.unwrap_or("");
    for (value, label) in [("", ""), ("smaw", "SMAW"), ("gmaw", "CO2"), ("tig", "TIG")] {
        html.push_str(&format!("<option value=\"{}\"{}>{}</option>\n", value, selected(method == value), label));
    }
    html.push_str("</select></label>\n");

    html.push_str(&format!(r#"<label><input type="checkbox" name="preheated" value="on"{}>예열</label>
<button type="submit">조회</button>
</form>
<canvas id="chart" height="100"></canvas>
<table>
<thead><tr>"#, checked(context.preheated)));

    for column in &context.columns {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &context.rows {
        html.push_str(&format!("<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                               escape(&row.time), row.temp, row.humidity, row.wind, row.rain, escape(&row.judgement)));
    }

    html.push_str(&format!(r#"</tbody>
</table>
<script>
const series = {chart};
const items = {graph_items};
const sets = {{
  temp: {{ label: "기온 (°C)", data: series.temps }},
  humidity: {{ label: "습도 (%)", data: series.humidities }},
  wind: {{ label: "풍속 (m/s)", data: series.winds }},
  rain: {{ label: "강수량 (mm)", data: series.rains }}
}};
new Chart(document.getElementById("chart"), {{
  type: "line",
  data: {{ labels: series.labels, datasets: items.map(i => sets[i]) }},
  options: {{
    plugins: {{ tooltip: {{ callbacks: {{ afterBody: ctx => series.judgments[ctx[0].dataIndex] }} }} }}
  }}
}});
</script>
</body>
</html>
"#,
        chart = chart,
        graph_items = graph_items,
    ));

    Ok(html)
}
