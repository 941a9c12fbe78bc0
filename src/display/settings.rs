//! Settings output formatting

use crate::config::Settings;

/// Format effective settings; the ledger password is never shown
pub fn format_settings(settings: &Settings) -> String {
    let mut output = String::new();
    output.push_str("FAFO Budget Reconciler Configuration\n");
    output.push_str("====================================\n");
    output.push_str(&format!("Server URL:        {}\n", settings.ledger.server_url));
    output.push_str("Server password:   ********\n");
    output.push_str(&format!("Sync ID:           {}\n", settings.ledger.sync_id));
    output.push('\n');
    output.push_str(&format!("Monthly target:    {}\n", settings.monthly_target));
    output.push_str(&format!("Recon start day:   {}\n", settings.recon_start_day));
    output.push_str(&format!("Recon end day:     {}\n", settings.recon_end_day));
    output.push_str(&format!("Recon time:        {}\n", settings.recon_time));
    output.push_str(&format!(
        "Other category:    {}\n",
        settings.other_category.as_deref().unwrap_or("(first in group)")
    ));
    output.push_str(&format!("Dry run:           {}\n", settings.dry_run));
    output.push_str(&format!("Bank sync:         {}\n", settings.bank_sync));
    output.push_str(&format!("Health port:       {}\n", settings.health_port));
    output.push_str(&format!("Log format:        {}\n", settings.log_format));
    output
}
