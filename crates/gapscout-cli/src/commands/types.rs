use anyhow::Result;
use tabled::Tabled;

use gapscout_core::models::BusinessType;

use crate::output::OutputWriter;

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Business Type")]
    label: &'static str,
}

pub fn execute(output: &OutputWriter) -> Result<()> {
    if output.is_json() {
        let labels: Vec<&str> = BusinessType::ALL.iter().map(|t| t.label()).collect();
        return output.result(&labels);
    }

    output.table(BusinessType::ALL.iter().map(|t| TypeRow { label: t.label() }).collect());
    Ok(())
}
