//! Pure rendering: status snapshot in, display lines out.
//!
//! Nothing in this module performs I/O or keeps state. The wall clock
//! is an argument, the palette and layout are arguments, so every call
//! is reproducible from its inputs. Lines carry color codes only;
//! cursor and clear sequences belong to the display driver.

use chrono::{DateTime, Local, Utc};

use agmon_core::{format_count, format_reset_time, truncate_label, StatusSnapshot};

use crate::config::MonitorConfig;
use crate::theme::Palette;

/// Two-line status notice shown in every non-connected state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No process found, never connected this session.
    Waiting,

    /// No process found after a successful session.
    ConnectionLost,

    /// Process found, no listening port yet.
    PortPending { pid: u32 },

    /// Process and port found, but the API is not answering.
    Unresponsive { pid: u32 },
}

/// Renders a quota bar of `width` cells for a percentage.
///
/// Filled cells = `floor(width * percent / 100)`, clamped to the bar;
/// the remainder renders as the empty glyph. The whole bar is wrapped
/// in the three-tier quota color for `percent`.
pub fn render_bar(percent: f64, width: usize, palette: &Palette) -> String {
    let filled = (((width as f64) * percent / 100.0).floor() as usize).min(width);
    let bar = format!("{}{}", "█".repeat(filled), "░".repeat(width - filled));
    palette.paint(palette.quota_color(percent), &bar)
}

/// Renders the full dashboard for a successful status fetch.
pub fn render_dashboard(
    snapshot: &StatusSnapshot,
    pid: u32,
    port: u16,
    width: usize,
    now: DateTime<Local>,
    palette: &Palette,
    config: &MonitorConfig,
) -> Vec<String> {
    let p = palette;
    let separator = "-".repeat(width.min(config.separator_cap));
    let now_utc = now.with_timezone(&Utc);

    let mut lines = Vec::with_capacity(12 + snapshot.models.len());

    // Header
    lines.push(format!("{}🚀 Antigravity Cockpit Monitor{}", p.bold, p.reset));
    lines.push(format!(
        "PID: {} | Port: {} | Time: {}",
        p.paint(p.cyan, &pid.to_string()),
        p.paint(p.cyan, &port.to_string()),
        now.format("%H:%M:%S")
    ));
    lines.push(separator.clone());

    // Account / plan
    lines.push(format!(
        "User:  {} ({})",
        p.paint(p.bold, snapshot.account_name.as_deref().unwrap_or("Unknown")),
        snapshot.account_email.as_deref().unwrap_or("N/A")
    ));
    lines.push(format!(
        "Plan:  {} ({})",
        p.paint(p.cyan, snapshot.plan_name.as_deref().unwrap_or("Free")),
        snapshot.tier_name.as_deref().unwrap_or("Unknown")
    ));

    // Aggregate credits
    let prompt = &snapshot.prompt_credits;
    match prompt.percentage() {
        Some(pct) => lines.push(format!(
            "Monthly Prompt Quota: {} {} / {} ({pct:.1}%)",
            render_bar(pct, config.aggregate_bar_width, p),
            format_count(prompt.available),
            format_count(prompt.monthly)
        )),
        None => lines.push(format!(
            "Prompt Quota:         {} (No limit info)",
            format_count(prompt.available)
        )),
    }

    // Flow credits only exist on some plans; omit the line entirely
    // when there is no monthly allowance.
    let flow = &snapshot.flow_credits;
    if let Some(pct) = flow.percentage() {
        lines.push(format!(
            "Monthly Flow Quota:   {} {} / {} ({pct:.1}%)",
            render_bar(pct, config.aggregate_bar_width, p),
            format_count(flow.available),
            format_count(flow.monthly)
        ));
    }

    // Model table
    lines.push(separator.clone());
    lines.push(format!(
        "{}{:<w$} {:<22} {}{}",
        p.bold,
        "Model Name",
        "Usage",
        "Reset In",
        p.reset,
        w = config.label_width
    ));
    lines.push(separator);

    for model in snapshot.models_sorted() {
        let label = truncate_label(model.label.as_deref().unwrap_or("Unknown"), config.label_max);
        let percent = model.percent_remaining();
        lines.push(format!(
            "{:<w$} {} {:>5.1}%  {}",
            label,
            render_bar(percent, config.model_bar_width, p),
            percent,
            format_reset_time(model.reset_time.as_deref(), now_utc),
            w = config.label_width
        ));
    }

    lines
}

/// Renders the two-line notice for a non-connected state.
pub fn render_notice(notice: &Notice, interval_secs: u64, palette: &Palette) -> Vec<String> {
    let p = palette;
    match notice {
        Notice::Waiting => vec![
            format!(
                "{} Waiting for Antigravity process...",
                p.paint(p.yellow, "●")
            ),
            format!("  Scanning process list... (Retrying in {interval_secs}s)"),
        ],
        Notice::ConnectionLost => vec![
            format!(
                "{} Connection lost. Waiting for process to restart...",
                p.paint(p.red, "●")
            ),
            format!("  Scanning process list... (Retrying in {interval_secs}s)"),
        ],
        Notice::PortPending { pid } => vec![
            format!(
                "{} Process detected (PID {pid}), waiting for port...",
                p.paint(p.yellow, "●")
            ),
            "  Service initializing...".to_string(),
        ],
        Notice::Unresponsive { pid } => vec![
            format!(
                "{} Connected to PID {pid} but API is unresponsive.",
                p.paint(p.red, "●")
            ),
            "  Retrying request...".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agmon_core::{CreditPool, ModelQuota};

    fn fixed_now() -> DateTime<Local> {
        DateTime::parse_from_rfc3339("2025-06-01T12:00:00Z")
            .map(|dt| dt.with_timezone(&Local))
            .unwrap_or_else(|_| Local::now())
    }

    fn snapshot() -> StatusSnapshot {
        StatusSnapshot {
            account_name: Some("Dev User".to_string()),
            account_email: Some("dev@example.com".to_string()),
            plan_name: Some("Pro".to_string()),
            tier_name: Some("Pro Tier".to_string()),
            prompt_credits: CreditPool::new(8_200, 10_000),
            flow_credits: CreditPool::new(410, 500),
            models: vec![
                ModelQuota {
                    label: Some("Slow Model".to_string()),
                    is_recommended: false,
                    remaining_fraction: 0.15,
                    reset_time: None,
                },
                ModelQuota {
                    label: Some("Gemini 3 Pro".to_string()),
                    is_recommended: true,
                    remaining_fraction: 0.82,
                    reset_time: Some("garbage".to_string()),
                },
            ],
        }
    }

    fn render(snap: &StatusSnapshot) -> Vec<String> {
        render_dashboard(
            snap,
            55083,
            55052,
            100,
            fixed_now(),
            &Palette::plain(),
            &MonitorConfig::default(),
        )
    }

    #[test]
    fn test_bar_fill_counts() {
        let p = Palette::plain();
        for width in [1usize, 15, 20, 33] {
            for percent in [0.0, 7.0, 20.0, 50.0, 99.9, 100.0] {
                let bar = render_bar(percent, width, &p);
                let filled = bar.matches('█').count();
                let empty = bar.matches('░').count();
                assert_eq!(filled, ((width as f64) * percent / 100.0) as usize);
                assert_eq!(filled + empty, width);
            }
        }
    }

    #[test]
    fn test_bar_color_tiers() {
        let p = Palette::default();
        assert!(render_bar(80.0, 10, &p).starts_with(p.green));
        assert!(render_bar(50.0, 10, &p).starts_with(p.yellow));
        assert!(render_bar(20.0, 10, &p).starts_with(p.red));
    }

    #[test]
    fn test_bar_overfull_clamps() {
        let p = Palette::plain();
        let bar = render_bar(140.0, 10, &p);
        assert_eq!(bar.matches('█').count(), 10);
        assert_eq!(bar.matches('░').count(), 0);
    }

    #[test]
    fn test_renderer_is_pure() {
        let snap = snapshot();
        assert_eq!(render(&snap), render(&snap));
    }

    #[test]
    fn test_dashboard_header_and_status_line() {
        let lines = render(&snapshot());
        assert_eq!(lines[0], "🚀 Antigravity Cockpit Monitor");
        assert_eq!(lines[1].split(" | Time: ").count(), 2);
        assert!(lines[1].starts_with("PID: 55083 | Port: 55052"));
    }

    #[test]
    fn test_separator_caps_at_eighty() {
        let lines = render_dashboard(
            &snapshot(),
            1,
            2,
            200,
            fixed_now(),
            &Palette::plain(),
            &MonitorConfig::default(),
        );
        assert_eq!(lines[2], "-".repeat(80));
    }

    #[test]
    fn test_separator_follows_narrow_terminal() {
        let lines = render_dashboard(
            &snapshot(),
            1,
            2,
            40,
            fixed_now(),
            &Palette::plain(),
            &MonitorConfig::default(),
        );
        assert_eq!(lines[2], "-".repeat(40));
    }

    #[test]
    fn test_account_and_plan_fallbacks() {
        let empty = StatusSnapshot::default();
        let lines = render(&empty);
        assert!(lines.iter().any(|l| l == "User:  Unknown (N/A)"));
        assert!(lines.iter().any(|l| l == "Plan:  Free (Unknown)"));
    }

    #[test]
    fn test_prompt_quota_with_limit() {
        let lines = render(&snapshot());
        let line = lines
            .iter()
            .find(|l| l.starts_with("Monthly Prompt Quota:"))
            .expect("prompt quota line");
        assert!(line.contains("8,200 / 10,000 (82.0%)"));
    }

    #[test]
    fn test_prompt_quota_without_limit() {
        let snap = StatusSnapshot {
            prompt_credits: CreditPool::new(1_234, 0),
            ..Default::default()
        };
        let lines = render(&snap);
        assert!(lines
            .iter()
            .any(|l| l == "Prompt Quota:         1,234 (No limit info)"));
    }

    #[test]
    fn test_flow_quota_omitted_without_limit() {
        let mut snap = snapshot();
        snap.flow_credits = CreditPool::new(410, 0);
        let lines = render(&snap);
        // Omitted entirely, not zero-filled
        assert!(!lines.iter().any(|l| l.contains("Flow Quota")));
    }

    #[test]
    fn test_flow_quota_present_with_limit() {
        let lines = render(&snapshot());
        assert!(lines
            .iter()
            .any(|l| l.starts_with("Monthly Flow Quota:   ") && l.contains("410 / 500 (82.0%)")));
    }

    #[test]
    fn test_model_rows_sorted_recommended_first() {
        let lines = render(&snapshot());
        let gemini = lines
            .iter()
            .position(|l| l.starts_with("Gemini 3 Pro"))
            .expect("recommended row");
        let slow = lines
            .iter()
            .position(|l| l.starts_with("Slow Model"))
            .expect("other row");
        assert!(gemini < slow);
    }

    #[test]
    fn test_model_row_format() {
        let lines = render(&snapshot());
        let row = lines
            .iter()
            .find(|l| l.starts_with("Gemini 3 Pro"))
            .expect("model row");
        // Label padded to 35, then bar, right-aligned percent, raw reset string
        assert!(row.starts_with(&format!("{:<35} ", "Gemini 3 Pro")));
        assert!(row.contains(" 82.0%  garbage"));
    }

    #[test]
    fn test_model_row_reset_absent_shows_na() {
        let lines = render(&snapshot());
        let row = lines
            .iter()
            .find(|l| l.starts_with("Slow Model"))
            .expect("model row");
        assert!(row.ends_with("N/A"));
    }

    #[test]
    fn test_long_label_truncated_to_34() {
        let snap = StatusSnapshot {
            models: vec![ModelQuota {
                label: Some("X".repeat(50)),
                ..Default::default()
            }],
            ..Default::default()
        };
        let lines = render(&snap);
        let row = lines.iter().find(|l| l.starts_with("XXX")).expect("row");
        let label_part: String = row.chars().take_while(|c| *c == 'X').collect();
        assert_eq!(label_part.chars().count(), 34);
    }

    #[test]
    fn test_notice_waiting() {
        let lines = render_notice(&Notice::Waiting, 1, &Palette::plain());
        assert_eq!(
            lines,
            vec![
                "● Waiting for Antigravity process...".to_string(),
                "  Scanning process list... (Retrying in 1s)".to_string(),
            ]
        );
    }

    #[test]
    fn test_notice_connection_lost_variant() {
        let lines = render_notice(&Notice::ConnectionLost, 1, &Palette::plain());
        assert!(lines[0].contains("Connection lost"));
        assert!(!lines[0].contains("Waiting for Antigravity"));
    }

    #[test]
    fn test_notice_port_pending_includes_pid() {
        let lines = render_notice(&Notice::PortPending { pid: 55083 }, 1, &Palette::plain());
        assert_eq!(
            lines[0],
            "● Process detected (PID 55083), waiting for port..."
        );
        assert_eq!(lines[1], "  Service initializing...");
    }

    #[test]
    fn test_notice_unresponsive_includes_pid() {
        let lines = render_notice(&Notice::Unresponsive { pid: 55083 }, 1, &Palette::plain());
        assert_eq!(lines[0], "● Connected to PID 55083 but API is unresponsive.");
        assert_eq!(lines[1], "  Retrying request...");
    }
}
