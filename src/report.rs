//! Printable amortization report, as plain text or standalone HTML.

use crate::currency::Currency;
use crate::loan::{Loan, ScheduleEntry};
use chrono::NaiveDateTime;
use std::fmt;
use tabled::{builder::Builder, Table};

const TITLE: &str = "Monthly Leaching Amount Calculator Report";
const FOOTER: &str = "This report was generated by the Monthly Leaching Amount Calculator";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const HTML_STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; color: #333; }
h1 { color: #1e40af; border-bottom: 2px solid #1e40af; padding-bottom: 10px; }
h2 { color: #1e40af; margin-top: 20px; font-size: 14px; }
.summary { display: flex; gap: 20px; margin: 20px 0; }
.summary-item { flex: 1; padding: 15px; background-color: #f0f9ff; border-left: 4px solid #1e40af; }
.summary-item p { margin: 5px 0; font-size: 12px; }
.summary-item .value { font-size: 18px; font-weight: bold; color: #1e40af; }
.details { font-size: 12px; margin: 15px 0; }
.details p { margin: 5px 0; }
table { width: 100%; border-collapse: collapse; margin-top: 20px; font-size: 11px; }
th { background-color: #1e40af; color: white; }
th, td { border: 1px solid #ddd; padding: 8px; text-align: right; }
th:first-child, td:first-child { text-align: left; }
tr.even { background-color: #f9fafb; }
tr.odd { background-color: #ffffff; }
.footer { margin-top: 30px; font-size: 10px; color: #666; border-top: 1px solid #ddd; padding-top: 10px; }
";

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ReportFormat {
    Text,
    #[default]
    Html,
}

#[derive(Clone, PartialEq, Debug)]
pub struct Report {
    pub loan: Loan,
    pub currency: Currency,
    pub generated_at: NaiveDateTime,
}

impl Report {
    pub fn new(loan: Loan, currency: Currency, generated_at: NaiveDateTime) -> Self {
        Self {
            loan,
            currency,
            generated_at,
        }
    }

    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self.to_text(),
            ReportFormat::Html => self.to_html(),
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn to_html(&self) -> String {
        Html(self).to_string()
    }

    fn money(&self, amt: f64) -> String {
        self.currency.format_amount(amt)
    }

    /// The schedule as a text table, without a trailing newline.
    pub fn schedule_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Month", "Payment", "Principal", "Interest", "Balance"]);
        for pmt in self.loan.schedule() {
            builder.push_record([
                pmt.month.to_string(),
                self.money(pmt.payment),
                self.money(pmt.principal),
                self.money(pmt.interest),
                self.money(pmt.balance),
            ]);
        }
        Table::from(builder).to_string()
    }
}

/// The plain-text report.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = &self.loan.terms;
        let pmt = self.loan.get_payment();

        writeln!(f, "{}", TITLE)?;
        writeln!(f, "{}", "=".repeat(TITLE.len()))?;
        writeln!(f)?;
        writeln!(
            f,
            "Currency:               {} ({})",
            self.currency.name(),
            self.currency.code()
        )?;
        writeln!(f, "Total Amount:           {}", self.money(terms.principal))?;
        writeln!(f, "Number of Years:        {}", terms.years)?;
        writeln!(f, "Annual Percentage Rate: {}%", terms.annual_rate)?;
        writeln!(f)?;
        writeln!(f, "Summary")?;
        writeln!(f, "-------")?;
        writeln!(f, "Monthly Payment:        {}", self.money(pmt.monthly))?;
        writeln!(f, "Total Payment:          {}", self.money(pmt.total))?;
        writeln!(f, "Total Interest:         {}", self.money(pmt.interest))?;
        writeln!(f)?;
        writeln!(f, "Amortization Schedule")?;
        writeln!(f, "---------------------")?;
        writeln!(f, "{}", self.schedule_table())?;
        writeln!(f)?;
        writeln!(
            f,
            "Generated on: {}",
            self.generated_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(f, "{}", FOOTER)
    }
}

struct Html<'a>(&'a Report);

impl Html<'_> {
    fn write_row(&self, f: &mut fmt::Formatter<'_>, idx: usize, pmt: &ScheduleEntry) -> fmt::Result {
        let report = self.0;
        let class = if idx % 2 == 0 { "even" } else { "odd" };
        writeln!(
            f,
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            class,
            pmt.month,
            escape(&report.money(pmt.payment)),
            escape(&report.money(pmt.principal)),
            escape(&report.money(pmt.interest)),
            escape(&report.money(pmt.balance))
        )
    }

    fn write_summary_item(&self, f: &mut fmt::Formatter<'_>, label: &str, amt: f64) -> fmt::Result {
        writeln!(
            f,
            "<div class=\"summary-item\"><p>{}</p><div class=\"value\">{}</div></div>",
            label,
            escape(&self.0.money(amt))
        )
    }
}

impl fmt::Display for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let terms = &report.loan.terms;
        let pmt = report.loan.get_payment();

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html>")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(f, "<title>Leaching Calculator Report</title>")?;
        writeln!(f, "<style>\n{}</style>", HTML_STYLE)?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<h1>{}</h1>", TITLE)?;

        writeln!(f, "<div class=\"details\">")?;
        writeln!(
            f,
            "<p><strong>Currency:</strong> {} ({})</p>",
            escape(report.currency.name()),
            escape(report.currency.code())
        )?;
        writeln!(
            f,
            "<p><strong>Total Amount:</strong> {}</p>",
            escape(&report.money(terms.principal))
        )?;
        writeln!(f, "<p><strong>Number of Years:</strong> {}</p>", terms.years)?;
        writeln!(
            f,
            "<p><strong>Annual Percentage Rate:</strong> {}%</p>",
            terms.annual_rate
        )?;
        writeln!(f, "</div>")?;

        writeln!(f, "<h2>Summary</h2>")?;
        writeln!(f, "<div class=\"summary\">")?;
        self.write_summary_item(f, "Monthly Payment", pmt.monthly)?;
        self.write_summary_item(f, "Total Payment", pmt.total)?;
        self.write_summary_item(f, "Total Interest", pmt.interest)?;
        writeln!(f, "</div>")?;

        writeln!(f, "<h2>Amortization Schedule</h2>")?;
        writeln!(f, "<table>")?;
        writeln!(
            f,
            "<thead><tr><th>Month</th><th>Payment</th><th>Principal</th><th>Interest</th><th>Balance</th></tr></thead>"
        )?;
        writeln!(f, "<tbody>")?;
        for (idx, pmt) in report.loan.schedule().iter().enumerate() {
            self.write_row(f, idx, pmt)?;
        }
        writeln!(f, "</tbody>")?;
        writeln!(f, "</table>")?;

        writeln!(f, "<div class=\"footer\">")?;
        writeln!(
            f,
            "<p>Generated on: {}</p>",
            report.generated_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(f, "<p>{}</p>", FOOTER)?;
        writeln!(f, "</div>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
