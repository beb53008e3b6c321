//! Interactive dashboard
//!
//! A self-contained HTML page with both chart views, hover tooltips, and data
//! tables built in the browser from an embedded JSON block.

use serde::Serialize;

use crate::error::InsightResult;
use crate::services::{CategoryTotals, MonthlyTotals};

use super::svg::{escape, line_chart, pie_chart, ChartStyle, Frame};

/// Page title of the dashboard
pub const DASHBOARD_TITLE: &str = "Budget & Expense Analysis Dashboard";

#[derive(Serialize)]
struct DashboardData<'a> {
    currency: &'a str,
    categories: &'a CategoryTotals,
    monthly: &'a MonthlyTotals,
}

const SCRIPT: &str = r#"
(function () {
  const data = JSON.parse(document.getElementById('chart-data').textContent);
  const tip = document.getElementById('tooltip');
  const money = (value) => {
    const sign = value < 0 ? '-' : '';
    return sign + data.currency + Math.abs(value).toFixed(2);
  };

  document.querySelectorAll('[data-tip]').forEach((el) => {
    el.addEventListener('mousemove', (ev) => {
      tip.textContent = el.getAttribute('data-tip');
      tip.style.left = (ev.pageX + 12) + 'px';
      tip.style.top = (ev.pageY + 12) + 'px';
      tip.style.display = 'block';
      el.classList.add('active');
    });
    el.addEventListener('mouseleave', () => {
      tip.style.display = 'none';
      el.classList.remove('active');
    });
  });

  const fill = (id, rows) => {
    const body = document.querySelector('#' + id + ' tbody');
    rows.forEach((cells) => {
      const tr = document.createElement('tr');
      cells.forEach((text) => {
        const td = document.createElement('td');
        td.textContent = text;
        tr.appendChild(td);
      });
      body.appendChild(tr);
    });
  };

  const total = data.categories.reduce((sum, c) => sum + c.total, 0);
  fill('category-table', data.categories.map((c) => [
    c.category,
    money(c.total),
    String(c.transaction_count),
    total === 0 ? '0.0%' : (c.total / total * 100).toFixed(1) + '%',
  ]));
  fill('monthly-table', Object.entries(data.monthly).map(([month, value]) => [month, money(value)]));
})();
"#;

const STYLE: &str = r#"
body { font-family: Arial, sans-serif; margin: 20px; color: #333; }
h1 { text-align: center; font-size: 24px; }
.dashboard { display: grid; grid-template-columns: 1fr 1fr; gap: 20px; }
.panel { border: 1px solid #ddd; padding: 10px; border-radius: 5px; }
.panel svg { width: 100%; height: auto; }
.slice, .point { cursor: pointer; transition: opacity 0.15s; }
.slice.active, .point.active { opacity: 0.75; }
#tooltip { position: absolute; display: none; background: rgba(0,0,0,0.8); color: white;
  padding: 6px 10px; border-radius: 4px; font-size: 13px; pointer-events: none; }
table { border-collapse: collapse; width: 100%; margin-top: 10px; }
th, td { border: 1px solid #ddd; padding: 6px; text-align: left; }
th { background-color: #f2f2f2; }
"#;

/// Build the dashboard page
pub fn dashboard_document(
    categories: &CategoryTotals,
    monthly: &MonthlyTotals,
    currency: &str,
) -> InsightResult<String> {
    let style = ChartStyle::dashboard(currency);
    let frame = Frame::new(0.0, 0.0, 700.0, 500.0);

    let data = DashboardData {
        currency,
        categories,
        monthly,
    };
    // Keep the JSON from closing the script element early
    let json = serde_json::to_string(&data)?.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{title}</title>
    <meta charset="utf-8">
    <style>{STYLE}</style>
</head>
<body>
    <h1>{title}</h1>
    <div class="dashboard">
        <div class="panel">
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 700 500" font-family="Arial, sans-serif">{pie}</svg>
            <table id="category-table"><thead><tr><th>Category</th><th>Amount</th><th>Count</th><th>Share</th></tr></thead><tbody></tbody></table>
        </div>
        <div class="panel">
            <svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 700 500" font-family="Arial, sans-serif">{line}</svg>
            <table id="monthly-table"><thead><tr><th>Month</th><th>Amount</th></tr></thead><tbody></tbody></table>
        </div>
    </div>
    <div id="tooltip"></div>
    <script type="application/json" id="chart-data">{json}</script>
    <script>{SCRIPT}</script>
</body>
</html>
"#,
        title = escape(DASHBOARD_TITLE),
        pie = pie_chart(categories, frame, &style),
        line = line_chart(monthly, frame, &style),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, Transaction};
    use crate::services::{totals_by_category, totals_by_month};
    use chrono::NaiveDate;

    #[test]
    fn test_dashboard_embeds_views_and_data() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let txns = vec![
            Transaction::new(date, "Bills</script>", Money::from_cents(2500)),
            Transaction::new(date, "Food", Money::from_cents(7500)),
        ];

        let html = dashboard_document(
            &totals_by_category(&txns),
            &totals_by_month(&txns),
            "£",
        )
        .unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Budget &amp; Expense Analysis Dashboard"));
        assert!(html.contains("data-tip"));
        assert!(html.contains(r#""2024-06":100.0"#));
        assert!(html.contains(r#""transaction_count":1"#));
        // Only the real closing tags remain
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
