use std::io::Write;

use anyhow::Result;
use blockpulse::config::Config;
use blockpulse::logging::{json_log, obj, v_num, v_str};
use blockpulse::pages::{render_page, DashboardData};

fn main() -> Result<()> {
    let cfg = Config::from_env();
    json_log(
        "runner",
        "startup",
        obj(&[
            ("data_dir", v_str(&cfg.data_dir.to_string_lossy())),
            (
                "pages",
                v_str(
                    &cfg.pages
                        .iter()
                        .map(|p| p.as_str())
                        .collect::<Vec<_>>()
                        .join(","),
                ),
            ),
            ("transfer_amount", v_num(cfg.transfer_amount)),
            ("growth_pct", v_num(cfg.growth_pct)),
        ]),
    );

    // One full top-to-bottom render: fresh tables, recompute everything.
    let data = DashboardData::load(&cfg.data_dir);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for page in &cfg.pages {
        let report = render_page(*page, &data, &cfg);
        writeln!(out, "\n=== {} ===", page.title())?;
        for section in &report.sections {
            writeln!(out, "\n-- {}", section.title)?;
            write!(out, "{}", section.body)?;
        }
    }
    Ok(())
}
