//! Interactive numbered menu over a [`Rolodex`].
//!
//! The menu only collects raw input and prints results; every rule lives in
//! the directory. Errors from directory operations are shown to the user
//! and the loop continues.

mod prompt;

pub use prompt::Prompt;

use crate::error::RolodexError;
use crate::models::{Contact, ContactUpdate};
use crate::services::{Rolodex, SearchMode, SearchOptions, SortKey, SortOrder};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use tracing::debug;

const MENU: &str = "
--- DIGITAL ROLODEX ---
1. Add new contact
2. View contact
3. Edit contact
4. Delete contact
5. Search contacts
6. List all contacts
7. Upcoming birthdays
8. Exit
";

const SEPARATOR: &str = "----------------------------------------";

/// The interactive menu loop.
pub struct Menu<R, W> {
    rolodex: Rolodex,
    prompt: Prompt<R, W>,
    search_mode: SearchMode,
    birthday_window_days: u32,
    today: NaiveDate,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(rolodex: Rolodex, input: R, output: W, today: NaiveDate) -> Self {
        Self {
            rolodex,
            prompt: Prompt::new(input, output),
            search_mode: SearchMode::default(),
            birthday_window_days: 30,
            today,
        }
    }

    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.search_mode = mode;
        self
    }

    pub fn with_birthday_window(mut self, days: u32) -> Self {
        self.birthday_window_days = days;
        self
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        self.birthday_banner()?;

        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    debug!("Input closed; leaving menu");
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        self.prompt.say("Goodbye!")
    }

    /// Give back the directory and the output sink.
    pub fn into_parts(self) -> (Rolodex, W) {
        (self.rolodex, self.prompt.into_output())
    }

    /// One menu round. Returns `false` on Exit.
    fn step(&mut self) -> io::Result<bool> {
        self.prompt.say(MENU)?;
        let choice = self.prompt.ask("Select an option: ")?;
        match choice.as_str() {
            "1" => self.add()?,
            "2" => self.view()?,
            "3" => self.edit()?,
            "4" => self.delete()?,
            "5" => self.search()?,
            "6" => self.list()?,
            "7" => self.birthdays()?,
            "8" => return Ok(false),
            _ => self.prompt.say("Invalid choice. Please select 1-8.")?,
        }
        Ok(true)
    }

    fn add(&mut self) -> io::Result<()> {
        self.prompt.say("\nAdd New Contact")?;
        let name = self.prompt.ask_required("Name: ")?;
        let email = self.prompt.ask_required("Email: ")?;
        let address = self.prompt.ask_optional("Address (optional): ")?;
        let phone = self
            .prompt
            .ask_optional("Phone (555-123-4567 or (555) 123-4567, optional): ")?;
        let date_of_birth = self
            .prompt
            .ask_optional("Date of Birth YYYY-MM-DD (optional): ")?;

        let contact = Contact {
            name,
            address,
            phone,
            email: Some(email),
            date_of_birth,
        };

        match self.rolodex.add_contact(contact) {
            Ok(_) => self.prompt.say("Contact added."),
            Err(e) => self.report("Failed to add contact", &e),
        }
    }

    fn view(&mut self) -> io::Result<()> {
        self.prompt.say("\nView Contact")?;
        let name = self.prompt.ask_required("Name to view: ")?;
        let text = match self.rolodex.view_contact(&name) {
            Ok(contact) => format!("{}\n{}\n{}", SEPARATOR, contact, SEPARATOR),
            Err(_) => "No contact found with that name.".to_string(),
        };
        self.prompt.say(text)
    }

    fn edit(&mut self) -> io::Result<()> {
        self.prompt.say("\nEdit Contact")?;
        let name = self.prompt.ask_required("Name of contact to edit: ")?;
        let current = match self.rolodex.view_contact(&name) {
            Ok(contact) => contact.clone(),
            Err(_) => return self.prompt.say("No contact found with that name."),
        };

        self.prompt
            .say("Leave a field blank to keep its value; enter '-' to clear an optional field.")?;
        self.prompt
            .say(format!("{}\n{}\n{}", SEPARATOR, current, SEPARATOR))?;

        let mut update = ContactUpdate::new();
        update.name = self.prompt.ask_optional(&format!("Name [{}]: ", current.name))?;
        update.address = self.ask_field("Address", current.address.as_deref())?;
        update.phone = self.ask_field("Phone", current.phone.as_deref())?;
        update.email = self.ask_field("Email", current.email.as_deref())?;
        update.date_of_birth =
            self.ask_field("Birth Date YYYY-MM-DD", current.date_of_birth.as_deref())?;

        if update.is_empty() {
            return self.prompt.say("Nothing changed.");
        }

        match self.rolodex.edit_contact(&name, update) {
            Ok(updated) => {
                self.prompt.say("Contact updated.")?;
                for contact in &updated {
                    self.prompt
                        .say(format!("{}\n{}\n{}", SEPARATOR, contact, SEPARATOR))?;
                }
                Ok(())
            }
            Err(e) => self.report("Failed to edit contact", &e),
        }
    }

    /// Blank keeps the value (`None`); `-` clears it (`Some("")`).
    fn ask_field(&mut self, label: &str, current: Option<&str>) -> io::Result<Option<String>> {
        let answer = self
            .prompt
            .ask_optional(&format!("{} [{}]: ", label, current.unwrap_or("")))?;
        Ok(answer.map(|a| if a == "-" { String::new() } else { a }))
    }

    fn delete(&mut self) -> io::Result<()> {
        self.prompt.say("\nDelete Contact")?;
        let name = self.prompt.ask_required("Name to delete: ")?;
        if !self
            .prompt
            .confirm(&format!("Are you sure you want to delete '{}'?", name))?
        {
            return self.prompt.say("Cancelled.");
        }

        match self.rolodex.delete_contact(&name) {
            Ok(removed) => self
                .prompt
                .say(format!("Deleted {} contact(s).", removed.len())),
            Err(RolodexError::NotFound(_)) => self.prompt.say("No contact found with that name."),
            Err(e) => self.report("Failed to delete contact", &e),
        }
    }

    fn search(&mut self) -> io::Result<()> {
        self.prompt.say("\nSearch Contacts")?;
        let query = self.prompt.ask_required("Search query: ")?;
        let options = SearchOptions::default().with_mode(self.search_mode);
        let lines = Self::numbered(&self.rolodex.search_with(&query, &options));
        self.prompt.say(lines)
    }

    fn list(&mut self) -> io::Result<()> {
        self.prompt.say("\nAll Contacts")?;
        let sort = self
            .prompt
            .ask("Sort by [name/email/birth_date] (blank keeps entry order): ")?;

        let lines = if sort.is_empty() {
            Self::numbered(&self.rolodex.list_contacts(None))
        } else {
            let key = match sort.parse::<SortKey>() {
                Ok(key) => key,
                Err(reason) => return self.prompt.say(format!("Invalid sort option: {}", reason)),
            };
            let order = if self.prompt.confirm("Reverse order?")? {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            Self::numbered(&self.rolodex.list_sorted(key, order))
        };
        self.prompt.say(lines)
    }

    fn birthdays(&mut self) -> io::Result<()> {
        let lines = self.birthday_lines();
        if lines.is_empty() {
            return self.prompt.say(format!(
                "No birthdays in the next {} days.",
                self.birthday_window_days
            ));
        }
        self.prompt.say(lines.join("\n"))
    }

    fn birthday_banner(&mut self) -> io::Result<()> {
        let lines = self.birthday_lines();
        if lines.is_empty() {
            return Ok(());
        }
        self.prompt.say("Upcoming birthdays:")?;
        self.prompt.say(lines.join("\n"))
    }

    fn birthday_lines(&self) -> Vec<String> {
        self.rolodex
            .upcoming_birthdays(self.today, self.birthday_window_days)
            .iter()
            .map(|b| {
                let when = match b.days_until {
                    0 => "today".to_string(),
                    1 => "tomorrow".to_string(),
                    n => format!("in {} days", n),
                };
                format!(
                    "  {} turns {} on {} ({})",
                    b.contact.name, b.turning, b.date, when
                )
            })
            .collect()
    }

    fn numbered(contacts: &[&Contact]) -> String {
        if contacts.is_empty() {
            return "No contacts found.".to_string();
        }
        contacts
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}. {}", i + 1, c.summary()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn report(&mut self, action: &str, error: &RolodexError) -> io::Result<()> {
        self.prompt.say(format!("{}: {}", action, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 4, 25).unwrap()
    }

    fn run(rolodex: Rolodex, script: &str) -> (Rolodex, String) {
        let input = Cursor::new(script.as_bytes().to_vec());
        let mut menu = Menu::new(rolodex, input, Vec::new(), today());
        menu.run().unwrap();
        let (rolodex, out) = menu.into_parts();
        (rolodex, String::from_utf8(out).unwrap())
    }

    fn temp_rolodex(dir: &tempfile::TempDir) -> Rolodex {
        Rolodex::open_file(dir.path().join("contacts.json"))
    }

    #[test]
    fn test_add_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let script = "1\nAna Li\nana@x.com\n\n555-123-4567\n1990-05-01\n6\n\n8\n";
        let (rolodex, out) = run(temp_rolodex(&dir), script);

        assert!(out.contains("Contact added."));
        assert!(out.contains("1. Ana Li <ana@x.com> | 555-123-4567 | "));
        assert_eq!(rolodex.len(), 1);
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_add_reports_validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = "1\nAna Li\nnot-an-email\n\n\n\n8\n";
        let (rolodex, out) = run(temp_rolodex(&dir), script);

        assert!(out.contains("Failed to add contact: Validation failed: Invalid email address"));
        assert!(rolodex.is_empty());
    }

    #[test]
    fn test_edit_clears_field_with_dash() {
        let dir = tempfile::tempdir().unwrap();
        let mut rolodex = temp_rolodex(&dir);
        rolodex
            .add_contact(Contact::new("Ana Li", "ana@x.com").with_address("Old St"))
            .unwrap();

        let script = "3\nana li\n\n-\n\n\n\n8\n";
        let (rolodex, out) = run(rolodex, script);

        assert!(out.contains("Contact updated."));
        assert!(rolodex.view_contact("Ana Li").unwrap().address.is_none());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let dir = tempfile::tempdir().unwrap();
        let mut rolodex = temp_rolodex(&dir);
        rolodex.add_contact(Contact::new("Ana Li", "ana@x.com")).unwrap();

        let (rolodex, out) = run(rolodex, "4\nAna Li\nn\n4\nNobody\ny\n8\n");
        assert!(out.contains("Cancelled."));
        assert!(out.contains("No contact found with that name."));
        assert_eq!(rolodex.len(), 1);

        let (rolodex, out) = run(rolodex, "4\nAna Li\ny\n8\n");
        assert!(out.contains("Deleted 1 contact(s)."));
        assert!(rolodex.is_empty());
    }

    #[test]
    fn test_birthday_banner_and_eof_exit() {
        let dir = tempfile::tempdir().unwrap();
        let mut rolodex = temp_rolodex(&dir);
        rolodex
            .add_contact(Contact::new("Ana Li", "ana@x.com").with_date_of_birth("1990-05-01"))
            .unwrap();

        let (_, out) = run(rolodex, "");
        assert!(out.starts_with(
            "Upcoming birthdays:\n  Ana Li turns 36 on 2026-05-01 (in 6 days)"
        ));
        assert!(out.ends_with("Goodbye!\n"));
    }

    #[test]
    fn test_invalid_choice_and_sort() {
        let dir = tempfile::tempdir().unwrap();
        let (_, out) = run(temp_rolodex(&dir), "9\n6\nage\n8\n");
        assert!(out.contains("Invalid choice. Please select 1-8."));
        assert!(out.contains("Invalid sort option"));
    }
}
