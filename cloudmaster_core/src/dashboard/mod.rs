/*
* Live per-cloud view.
*
* Owns the displayed vm list and the last error line. One eager fetch on
* activation, then a recurring refresh; every emission redraws the
* screen. Deletes are fired and forgotten, the row disappears on a later
* refresh once the backend has processed them.
*/
use crate::display::vm::vm_table;
use crate::poller::{PollEvent, Poller};
use crate::rest::RestClient;
use crate::vm::Vm;

use std::io::Write;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use futures::StreamExt;
use owo_colors::OwoColorize;

// Error Handling
use cloudmaster_error::CloudmasterError;
use log::warn;

pub struct Dashboard {
    client: RestClient,
    period: Duration,
    vms: Vec<Vm>,
    error: Option<String>,
    selected: usize,
}

impl Dashboard {
    pub fn new(client: RestClient, period: Duration) -> Self {
        Self {
            client,
            period,
            vms: vec![],
            error: None,
            selected: 0,
        }
    }

    pub async fn run(&mut self) -> Result<(), CloudmasterError> {
        let mut stdout = std::io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen)?;

        let res = self.event_loop().await;

        execute!(stdout, LeaveAlternateScreen)?;
        disable_raw_mode()?;
        res
    }

    async fn event_loop(&mut self) -> Result<(), CloudmasterError> {
        // Eager initial fetch. Its failures are logged only, the error
        // line is fed by the recurring refresh.
        match self.client.list().await {
            Ok(vms) => self.vms = vms,
            Err(e) => warn!("{}", e),
        }
        self.render()?;

        let mut handle = Poller::start(self.client.clone(), self.period);
        let mut keys = EventStream::new();

        loop {
            tokio::select! {
                event = handle.recv() => match event {
                    Some(PollEvent::Refresh(vms)) => {
                        // Replace wholesale, no merge or diff.
                        self.vms = vms;
                        if self.selected >= self.vms.len() {
                            self.selected = self.vms.len().saturating_sub(1);
                        }
                        self.render()?;
                    }
                    Some(PollEvent::Failed(message)) => {
                        // Last failure wins.
                        self.error = Some(message);
                        self.render()?;
                    }
                    None => break,
                },
                key = keys.next() => match key {
                    Some(Ok(Event::Key(key))) => {
                        if self.on_key(key) {
                            break;
                        }
                        self.render()?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
            }
        }
        handle.stop();
        Ok(())
    }

    /// Returns true when the view should close.
    fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.vms.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            _ => {}
        }
        false
    }

    /// Fire the delete request for the selected row.
    /// The outcome is neither awaited nor displayed, and the list is
    /// left untouched until the next scheduled refresh.
    fn delete_selected(&self) {
        if let Some(vm) = self.vms.get(self.selected) {
            let client = self.client.clone();
            let name = vm.name.to_owned();
            tokio::spawn(async move {
                if let Err(e) = client.delete(&name).await {
                    warn!("{}", e);
                }
            });
        }
    }

    fn render(&self) -> Result<(), CloudmasterError> {
        let mut frame = String::new();
        frame.push_str(&format!(
            "{} {}  (refresh every {}ms)\n",
            "cloudmaster".bold(),
            self.client.cloud.label.bold().blue(),
            self.period.as_millis(),
        ));
        frame.push_str("j/k: select  d: delete  q: quit\n\n");
        frame.push_str(&vm_table(&self.vms, self.selected).to_string());
        frame.push('\n');
        if let Some(error) = &self.error {
            frame.push_str(&format!("\n{}\n", error.red()));
        }

        // Raw mode needs explicit carriage returns.
        let mut stdout = std::io::stdout();
        queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
        write!(stdout, "{}", frame.replace('\n', "\r\n"))?;
        stdout.flush()?;
        Ok(())
    }
}
