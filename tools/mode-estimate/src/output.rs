use anyhow::Result;
use serde::Serialize;

use wayfarer_estimate::{ModeEstimate, RouteEstimate};

/// Estimates for one input route
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub route: RouteEstimate,
    pub peak: bool,
    pub estimates: Vec<ModeEstimate>,
}

impl RouteReport {
    pub fn new(route: &RouteEstimate, peak: bool, estimates: Vec<ModeEstimate>) -> Self {
        Self {
            route: *route,
            peak,
            estimates,
        }
    }
}

pub fn print_json(reports: &[RouteReport]) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}

pub fn print_table(reports: &[RouteReport]) {
    for (index, report) in reports.iter().enumerate() {
        if index > 0 {
            println!();
        }
        for line in render_report(report) {
            println!("{line}");
        }
    }
}

fn render_report(report: &RouteReport) -> Vec<String> {
    let route = &report.route;
    let when = route
        .time_of_day
        .map(|t| t.format("%a %Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "now".to_owned());

    let mut lines = vec![format!(
        "{:.2} km, {:.1} min by car ({when}{})",
        route.distance_km,
        route.drive_duration_min,
        if report.peak { ", peak" } else { "" }
    )];

    if report.estimates.is_empty() {
        lines.push("  no estimates".to_owned());
        return lines;
    }

    for estimate in &report.estimates {
        lines.push(format!(
            "  {:<8} {:>12}  ({:.2} min)",
            estimate.label,
            estimate.display_duration(),
            estimate.duration_min
        ));
    }
    lines
}
