//! Plain-text summary in the fixed format operators paste into radio logs and chats.

use crate::balance::Endurance;
use crate::results::Results;

pub const REPORT_TITLE: &str = "[水源計算機報表]";

/// `v` with `digits` decimals, exact ties rounded away from zero.
pub fn fixed(v: f64, digits: usize) -> String {
    let scale = 10f64.powi(digits as i32);
    let rounded = (v * scale).round() / scale;
    format!("{rounded:.digits$}")
}

/// Minutes with one decimal, `-` when the value never completes.
pub fn format_minutes(v: f64) -> String {
    if v.is_finite() {
        fixed(v, 1)
    } else {
        "-".to_string()
    }
}

/// Tank endurance as shown in the report.
pub fn format_endurance(e: &Endurance) -> String {
    match e {
        Endurance::Sufficient => "充足 ∞".to_string(),
        Endurance::Remaining { minutes, seconds } => format!("{minutes}分{seconds}秒"),
        Endurance::Unknown => "-".to_string(),
    }
}

fn sufficiency_tag(net: f64) -> &'static str {
    if net > 0.0 { "不足" } else { "充足" }
}

fn gpm(v: f64) -> i64 {
    v.round() as i64
}

pub fn render(r: &Results) -> String {
    format!(
        "{REPORT_TITLE}\n\
         總需求: {} gpm\n\
         總供給: {} gpm\n\
         淨需求: {} gpm ({})\n\
         水箱撐時: {}\n\
         供需覆蓋率: {}%",
        gpm(r.demand),
        gpm(r.frontline() + r.relay()),
        gpm(r.net()),
        sufficiency_tag(r.net()),
        format_endurance(&r.balance.endurance()),
        gpm(r.coverage()),
    )
}
