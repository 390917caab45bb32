use crate::cloud::Cloud;

use owo_colors::OwoColorize;
use tabled::{settings::Style, Table, Tabled};

// Error Handling
use cloudmaster_error::CloudmasterError;

/// Row shape of the `cloud ls` table.
#[derive(Debug, Clone, Tabled)]
pub struct CloudTable {
    pub label: String,
    pub base_path: String,
    pub url: String,
}

impl CloudTable {
    pub fn from(cloud: &Cloud, api_url: &str) -> Self {
        Self {
            label: cloud.label.to_owned(),
            base_path: cloud.base_path.to_owned(),
            url: format!("{}{}", api_url, cloud.base_path),
        }
    }
}

impl Cloud {
    pub fn get_header(&self) -> String {
        format!("{}", self.label.bold().blue())
    }
    pub fn display(items: Vec<Cloud>, api_url: &str) -> Result<(), CloudmasterError> {
        let rows: Vec<CloudTable> = items.iter().map(|e| CloudTable::from(e, api_url)).collect();
        let mut res = Table::new(&rows);
        res.with(Style::rounded());
        println!("{}", res);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_bindings() -> Result<(), CloudmasterError> {
        println!("");
        Cloud::display(Cloud::get_all(), "https://gateway.example.com/")?;
        Ok(())
    }
}
