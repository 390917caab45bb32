use crate::cloud::Cloud;
use crate::vm::Vm;

use owo_colors::OwoColorize;
use std::collections::HashMap;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

// Error Handling
use cloudmaster_error::CloudmasterError;

/// Row shape of the vm tables.
#[derive(Default, Debug, Clone, Eq, PartialEq, Tabled)]
pub struct VmTable {
    pub id: String,
    pub name: String,
    #[tabled(display("display_state"))]
    pub state: String,
    pub cloud: String,
}

impl From<&Vm> for VmTable {
    fn from(e: &Vm) -> Self {
        Self {
            id: e.id.to_owned(),
            name: e.name.to_owned(),
            state: e.state.to_owned(),
            cloud: e.cloud.to_owned(),
        }
    }
}

/// Color a backend state string. Backends disagree on vocabulary
/// (aws "running", gcp "STAGING", vsphere "poweredOn"), so matching is
/// case insensitive and unknown states stay uncolored.
pub fn display_state(state: &String) -> String {
    let res = match state.to_lowercase().as_str() {
        "running" | "poweredon" | "succeeded" => state.green().to_string(),
        "pending" | "staging" | "provisioning" | "creating" | "starting" => {
            state.yellow().to_string()
        }
        "stopped" | "stopping" | "terminated" | "shutting-down" | "poweredoff" | "deallocated"
        | "failed" => state.red().to_string(),
        _ => state.white().to_string(),
    };
    format!("{}", res)
}

impl Vm {
    pub fn display_by_cloud(items: HashMap<Cloud, Vec<Vm>>) -> Result<(), CloudmasterError> {
        // One table per cloud with the cloud label as header.
        for (cloud, vms) in items {
            let header = cloud.get_header();
            Vm::display_w_header(&vms, &header)?;
        }
        Ok(())
    }
    pub fn display_w_header(items: &[Vm], header: &str) -> Result<(), CloudmasterError> {
        println!("\n{}", header);
        Self::display(items)
    }
    pub fn display(items: &[Vm]) -> Result<(), CloudmasterError> {
        let rows: Vec<VmTable> = items.iter().map(VmTable::from).collect();
        let mut res = Table::new(&rows);
        res.with(Style::rounded());
        println!("{}", res);
        Ok(())
    }
}

/// Table for the live view, with a cursor column.
pub fn vm_table(items: &[Vm], selected: usize) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["", "id", "name", "state", "cloud"]);
    for (index, vm) in items.iter().enumerate() {
        let marker = if index == selected { ">" } else { "" };
        builder.push_record([
            marker.to_owned(),
            vm.id.to_owned(),
            vm.name.to_owned(),
            display_state(&vm.state),
            vm.cloud.to_owned(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_display_state() {
        println!("\n{}", display_state(&"running".to_owned()));
        println!("{}", display_state(&"poweredOff".to_owned()));
        println!("{}", display_state(&"STAGING".to_owned()));
    }

    #[test]
    fn display_mock() -> Result<(), CloudmasterError> {
        let vms = vec![
            Vm {
                id: "i-0f47ef92".to_owned(),
                name: "builder".to_owned(),
                state: "running".to_owned(),
                cloud: "aws".to_owned(),
            },
            Vm {
                id: "4711".to_owned(),
                name: "staging-db".to_owned(),
                state: "poweredOff".to_owned(),
                cloud: "vsphere".to_owned(),
            },
        ];

        println!("");
        Vm::display(&vms)?;
        Ok(())
    }

    #[test]
    fn marker_follows_selection() {
        let vms = vec![
            Vm {
                name: "vm1".to_owned(),
                ..Default::default()
            },
            Vm {
                name: "vm2".to_owned(),
                ..Default::default()
            },
        ];

        let table = vm_table(&vms, 1).to_string();
        let marked: Vec<&str> = table.lines().filter(|l| l.contains('>')).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains("vm2"));
    }
}
