//! Upcoming-birthday reminders.

use crate::models::Contact;
use chrono::NaiveDate;

/// A contact whose birthday falls inside the reminder window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday<'a> {
    pub contact: &'a Contact,

    /// The next anniversary, on or after the reference day
    pub date: NaiveDate,

    /// Zero when the birthday is today
    pub days_until: i64,

    /// Age the contact turns on `date`
    pub turning: i32,
}

/// Collect the birthdays falling within `within_days` days of `today`
/// (inclusive), soonest first, ties broken by name.
///
/// Contacts without a date of birth, or with one that does not parse, are
/// ignored. So are dates of birth after the computed anniversary.
pub fn upcoming_birthdays<'a>(
    contacts: impl IntoIterator<Item = &'a Contact>,
    today: NaiveDate,
    within_days: u32,
) -> Vec<UpcomingBirthday<'a>> {
    let mut upcoming: Vec<UpcomingBirthday<'a>> = contacts
        .into_iter()
        .filter_map(|contact| {
            let birth = contact.birth_date()?;
            let date = birth.next_occurrence(today);
            let days_until = (date - today).num_days();
            let turning = birth.age_on(date);

            if days_until > i64::from(within_days) || turning < 1 {
                return None;
            }

            Some(UpcomingBirthday {
                contact,
                date,
                days_until,
                turning,
            })
        })
        .collect();

    upcoming.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.contact.name.to_lowercase().cmp(&b.contact.name.to_lowercase()))
    });
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_is_inclusive_and_sorted() {
        let contacts = vec![
            Contact::new("Late", "late@x.com").with_date_of_birth("1980-05-31"),
            Contact::new("Today", "today@x.com").with_date_of_birth("1990-05-01"),
            Contact::new("Outside", "out@x.com").with_date_of_birth("1970-06-01"),
            Contact::new("No Date", "none@x.com"),
        ];

        let upcoming = upcoming_birthdays(&contacts, ymd(2026, 5, 1), 30);
        let names: Vec<&str> = upcoming.iter().map(|u| u.contact.name.as_str()).collect();
        assert_eq!(names, vec!["Today", "Late"]);
        assert_eq!(upcoming[0].days_until, 0);
        assert_eq!(upcoming[0].turning, 36);
        assert_eq!(upcoming[1].days_until, 30);
    }

    #[test]
    fn test_wraps_into_next_year() {
        let contacts = vec![Contact::new("Ada", "ada@x.com").with_date_of_birth("1815-01-05")];
        let upcoming = upcoming_birthdays(&contacts, ymd(2026, 12, 20), 30);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].date, ymd(2027, 1, 5));
        assert_eq!(upcoming[0].turning, 212);
    }

    #[test]
    fn test_future_birth_dates_are_ignored() {
        let contacts = vec![Contact::new("Future", "f@x.com").with_date_of_birth("2030-05-02")];
        assert!(upcoming_birthdays(&contacts, ymd(2026, 5, 1), 30).is_empty());
    }
}
