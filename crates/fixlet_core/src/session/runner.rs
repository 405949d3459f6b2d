//! Interactive menu loop over a borrowed record store.
//!
//! # Responsibility
//! - Read menu selections and field input line by line.
//! - Dispatch to store mutations and record operations.
//! - Persist the store exactly once, on the exit selection.
//!
//! # Invariants
//! - Only the exit selection reaches `SessionState::Exited`.
//! - A failed save is reported but never keeps the loop running.
//! - Closed input ends the loop without saving.

use super::menu::{MenuChoice, MENU_TEXT};
use crate::codec::{save_records, CodecError};
use crate::model::record::{parse_count_or_zero, FixletRecord};
use crate::repo::record_store::RecordStore;
use crate::search::field_query::query;
use crate::service::record_ops::{list, sort_by_fixlet_id};
use log::{debug, error, info, warn};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Exited,
}

/// How a session loop ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// Exit was selected; `save_error` is set when persisting failed.
    Exited { save_error: Option<CodecError> },
    /// Input reached end-of-file before exit was selected. Nothing was saved.
    InputClosed,
}

impl SessionOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Exited { save_error: None })
    }
}

/// Menu-driven session bound to one store, one backing file and one terminal.
pub struct Session<'s, R, W> {
    store: &'s mut RecordStore,
    data_path: PathBuf,
    input: R,
    output: W,
    state: SessionState,
}

impl<'s, R: BufRead, W: Write> Session<'s, R, W> {
    pub fn new(
        store: &'s mut RecordStore,
        data_path: impl AsRef<Path>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            data_path: data_path.as_ref().to_path_buf(),
            input,
            output,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Runs until exit is selected or input closes.
    ///
    /// # Errors
    /// Returns terminal I/O errors only; codec failures surface through
    /// `SessionOutcome::Exited`.
    pub fn run(&mut self) -> io::Result<SessionOutcome> {
        info!(
            "event=session_start module=session status=ok records={}",
            self.store.len()
        );

        loop {
            write!(self.output, "Enter your choice!\n{MENU_TEXT}\nChoose: ")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return self.input_closed();
            };

            let choice = MenuChoice::parse(&line);
            debug!(
                "event=menu_select module=session status={} choice={}",
                if choice.is_some() { "ok" } else { "invalid" },
                choice.map_or("none", MenuChoice::as_str)
            );

            match choice {
                Some(MenuChoice::List) => self.render_listing()?,
                Some(MenuChoice::Query) => {
                    if !self.handle_query()? {
                        return self.input_closed();
                    }
                }
                Some(MenuChoice::Sort) => {
                    sort_by_fixlet_id(self.store);
                    writeln!(self.output, "Entries sorted.")?;
                    self.render_listing()?;
                }
                Some(MenuChoice::Add) => {
                    if !self.handle_add()? {
                        return self.input_closed();
                    }
                }
                Some(MenuChoice::Delete) => {
                    if !self.handle_delete()? {
                        return self.input_closed();
                    }
                }
                Some(MenuChoice::Exit) => return self.handle_exit(),
                None => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    fn render_listing(&mut self) -> io::Result<()> {
        if self.store.is_empty() {
            return writeln!(self.output, "No entries.");
        }
        for (index, record) in list(self.store) {
            writeln!(self.output, "{index}. {record}")?;
        }
        Ok(())
    }

    fn handle_query(&mut self) -> io::Result<bool> {
        let Some(field_name) =
            self.prompt("Enter key (site_id/fixlet_id/name/criticality): ")?
        else {
            return Ok(false);
        };
        let Some(value) = self.prompt("Enter value: ")? else {
            return Ok(false);
        };

        let hits = query(self.store, field_name.trim(), &value);
        if hits.is_empty() {
            writeln!(self.output, "No matching entries.")?;
        }
        for record in hits {
            writeln!(self.output, "{record}")?;
        }
        Ok(true)
    }

    fn handle_add(&mut self) -> io::Result<bool> {
        let Some(site_id) = self.prompt("Enter SiteID: ")? else {
            return Ok(false);
        };
        let Some(fixlet_id) = self.prompt("Enter FixletID: ")? else {
            return Ok(false);
        };
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(false);
        };
        let Some(criticality) = self.prompt("Enter Criticality: ")? else {
            return Ok(false);
        };
        let Some(count) = self.prompt("Enter RelevantComputerCount: ")? else {
            return Ok(false);
        };

        let record = FixletRecord::new(
            site_id,
            fixlet_id,
            name,
            criticality,
            parse_count_or_zero(&count),
        );
        writeln!(self.output, "Entry added: {record}")?;
        self.store.append(record);
        Ok(true)
    }

    fn handle_delete(&mut self) -> io::Result<bool> {
        let Some(fixlet_id) = self.prompt("Enter FixletID to delete: ")? else {
            return Ok(false);
        };

        let removed = self.store.remove_by_key(&fixlet_id);
        if removed == 0 {
            writeln!(self.output, "No entries with FixletID {fixlet_id}.")?;
        } else {
            let noun = if removed == 1 { "entry" } else { "entries" };
            writeln!(
                self.output,
                "Deleted {removed} {noun} with FixletID {fixlet_id}."
            )?;
        }
        Ok(true)
    }

    fn handle_exit(&mut self) -> io::Result<SessionOutcome> {
        let save_error = save_records(&self.data_path, self.store.all()).err();
        if let Some(err) = &save_error {
            writeln!(self.output, "Error saving file: {err}")?;
            error!(
                "event=session_exit module=session status=error error_code=save_failed records={}",
                self.store.len()
            );
        } else {
            info!(
                "event=session_exit module=session status=ok records={}",
                self.store.len()
            );
        }

        self.state = SessionState::Exited;
        writeln!(self.output, "Exiting the program!")?;
        self.output.flush()?;
        Ok(SessionOutcome::Exited { save_error })
    }

    fn input_closed(&mut self) -> io::Result<SessionOutcome> {
        warn!(
            "event=session_exit module=session status=input_closed records={}",
            self.store.len()
        );
        Ok(SessionOutcome::InputClosed)
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Reads one line without its line ending; `None` at end of input.
    ///
    /// Other whitespace is kept so stored values with padding stay reachable.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let content_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(content_len);
        Ok(Some(line))
    }
}

/// Runs one session over `store`, saving to `data_path` on exit.
pub fn run_session<R: BufRead, W: Write>(
    store: &mut RecordStore,
    data_path: impl AsRef<Path>,
    input: R,
    output: W,
) -> io::Result<SessionOutcome> {
    Session::new(store, data_path, input, output).run()
}
