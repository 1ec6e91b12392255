use anyhow::{Result, bail};

pub fn print(emails: &[String], format: &str) -> Result<()> {
    match format {
        "human" => {
            for email in emails {
                println!("{email}");
            }
        }
        "json" => {
            #[cfg(feature = "with-serde")]
            println!("{}", serde_json::to_string_pretty(emails)?);
            #[cfg(not(feature = "with-serde"))]
            bail!("format=json requires the 'with-serde' feature");
        }
        other => bail!("unknown --format '{other}', use: human|json"),
    }
    Ok(())
}
