//! List currencies command.

use anyhow::Result;
use fxcalc_config::AppConfig;
use fxcalc_core::types::PipConvention;

pub async fn run(config: &AppConfig) -> Result<()> {
    let allowed = config.allow_list()?;

    println!("Accepted Currencies");
    println!("═══════════════════════════════════════");
    println!();

    for code in allowed.iter() {
        let pip = PipConvention::for_quote(*code).pip_decimal();
        println!("  {}    pip size as quote: {}", code, pip);
    }

    println!();
    println!("{} currencies. Edit [currencies] allowed to change the list.", allowed.len());

    Ok(())
}
