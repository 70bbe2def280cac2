use iso_currency::Currency;

use crate::{
    domain::entities::{
        partner::Partner,
        payable_item::PayableItem,
        payout_record::{PayoutRecord, PayoutStatus},
    },
    presentation::amount_fmt::format_amount,
};

const RULE_WRAP_WIDTH: usize = 58;

/// Renders payout paperwork as plain text: a preview of a selection before
/// registration, and the final statement of a registered payout.
pub struct StatementPrinter {
    currency: Currency,
}

impl StatementPrinter {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    /// Preview of selected statement lines, rule descriptions included.
    pub fn print_selection(&self, partner: &Partner, items: &[PayableItem]) -> String {
        let mut out = String::new();
        out.push_str(&format!("Payout preview - {} ({})\n", partner.name, partner.id));
        out.push_str(&rule_line());
        for item in items {
            out.push_str(&format!(
                "{:<14} {:<16} {:<24} {:>16}\n",
                item.subscription_id.to_string(),
                item.period.to_string(),
                item.client,
                format_amount(item.amount, self.currency),
            ));
            for line in textwrap::wrap(&item.rule, RULE_WRAP_WIDTH) {
                out.push_str(&format!("    ; {line}\n"));
            }
        }
        out.push_str(&rule_line());
        let total: f64 = items.iter().map(|i| i.amount).sum();
        out.push_str(&format!(
            "{:<56} {:>16}\n",
            "Total",
            format_amount(total, self.currency)
        ));
        out
    }

    /// Statement of a registered payout, one line per liquidation.
    pub fn print_payout(&self, record: &PayoutRecord) -> String {
        let mut out = String::new();
        out.push_str(&format!("Payout statement {}\n", record.id));
        out.push_str(&format!(
            "Partner: {} ({})\n",
            record.partner_name, record.partner_id
        ));
        out.push_str(&format!("Generated: {}\n", record.generated));
        match (record.status, record.payment_date) {
            (PayoutStatus::Paid, Some(date)) => {
                out.push_str(&format!("Status: Paid on {date}\n"));
            }
            _ => out.push_str("Status: Pending\n"),
        }
        out.push_str(&rule_line());
        for item in &record.items {
            out.push_str(&format!(
                "{:<14} {:<16} {:>16}\n",
                item.subscription_id.to_string(),
                item.period.to_string(),
                format_amount(item.amount, self.currency),
            ));
        }
        out.push_str(&rule_line());
        out.push_str(&format!(
            "{:<32} {:>16}\n",
            "Total",
            format_amount(record.total_amount, self.currency)
        ));
        out
    }
}

fn rule_line() -> String {
    format!("{}\n", "-".repeat(74))
}
