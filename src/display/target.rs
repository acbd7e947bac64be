//! Target display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::config::settings::Settings;
use crate::models::AggregateTarget;

#[derive(Tabled)]
struct TargetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    granularity: String,
    #[tabled(rename = "Period")]
    period: String,
    #[tabled(rename = "Target")]
    total: String,
    #[tabled(rename = "Per day")]
    per_day: String,
}

/// Format a list of targets as a table
pub fn format_target_list(targets: &[AggregateTarget], settings: &Settings) -> String {
    if targets.is_empty() {
        return "No targets found.".to_string();
    }

    let rows = targets.iter().map(|target| TargetRow {
        id: target.id.to_string(),
        granularity: target.granularity().label().to_string(),
        period: target.period.label(),
        total: settings.format_amount(target.total_amount),
        per_day: target
            .distribution
            .last()
            .map(|slice| settings.format_amount(slice.amount))
            .unwrap_or_default(),
    });

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Format one target with its daily distribution
pub fn format_target_details(target: &AggregateTarget, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Target {}\n", target.id));
    output.push_str(&format!("  Period:  {} ({})\n", target.period.label(), target.period));
    output.push_str(&format!("  Total:   {}\n", settings.format_amount(target.total_amount)));
    output.push_str(&format!("  Status:  {}\n", target.status));
    output.push_str(&format!(
        "  Created: {}\n",
        target.created_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(reason) = &target.supersede_reason {
        output.push_str(&format!("  Reason:  {}\n", reason));
    }

    output.push_str("\nDistribution:\n");
    for slice in &target.distribution {
        output.push_str(&format!(
            "  {}  {:>14}\n",
            slice.date,
            settings.format_amount(slice.amount)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;

    #[test]
    fn test_empty_list() {
        assert_eq!(
            format_target_list(&[], &Settings::default()),
            "No targets found."
        );
    }

    #[test]
    fn test_list_shows_label_and_amounts() {
        let target = AggregateTarget::new(Period::month(2025, 5).unwrap(), 310_000).unwrap();
        let text = format_target_list(&[target], &Settings::default());

        assert!(text.contains("2025년 5월"));
        assert!(text.contains("310,000원"));
        assert!(text.contains("10,000원"));
    }

    #[test]
    fn test_details_list_every_day() {
        let target =
            AggregateTarget::new(Period::week_containing("2025-05-14".parse().unwrap()), 7).unwrap();
        let text = format_target_details(&target, &Settings::default());

        assert!(text.contains("2025-05-12 ~ 2025-05-18"));
        assert_eq!(text.matches("1원").count(), 7);
    }
}
