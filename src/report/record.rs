//! The immutable record built for each accepted message.

use std::cmp::Ordering;

use crate::location::Location;

use super::severity::Severity;

/// One accepted message: identity, position, body, and severity.
///
/// Records are created by the reporter when a message passes
/// classification, are immutable from then on, and leave the buffer
/// exactly once, at flush. Identity is the `id` alone; two records are
/// equal iff their ids are equal.
#[derive(Debug, Clone)]
pub struct Record {
    /// Strictly increasing per reporter, assigned at creation, never
    /// reused.
    pub id: u64,
    /// Where the message originated; may be the null location.
    pub location: Location,
    /// Indent depth at creation time.
    pub indent: u32,
    /// The message body. May span multiple lines (file-contents records).
    pub text: String,
    /// The severity kind, fixed at creation.
    pub severity: Severity,
    /// Id of the producing process. Diagnostic metadata only; never used
    /// for ordering.
    pub origin: u32,
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Record {}

impl Record {
    /// Buffer ordering: records sharing a non-empty file name sort by
    /// `(first_line, first_column, id)`; any other pair sorts by `id`
    /// (emission order).
    ///
    /// This is the insertion comparator for the flush buffer. It is
    /// deliberately not an `Ord` impl: across records with mixed file
    /// names the relation is not transitive, so it must only ever be used
    /// to pick an insertion position.
    pub(crate) fn buffer_cmp(&self, other: &Record) -> Ordering {
        let file = self.location.file_name();
        if !file.is_empty() && file == other.location.file_name() {
            (
                self.location.first_line(),
                self.location.first_column(),
                self.id,
            )
                .cmp(&(
                    other.location.first_line(),
                    other.location.first_column(),
                    other.id,
                ))
        } else {
            self.id.cmp(&other.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, location: Location) -> Record {
        Record {
            id,
            location,
            indent: 0,
            text: String::new(),
            severity: Severity::Message,
            origin: 0,
        }
    }

    #[test]
    fn equality_is_by_id_only() {
        let a = record(1, Location::line("a.c", 1));
        let b = record(1, Location::line("b.c", 9));
        let c = record(2, Location::line("a.c", 1));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn same_file_orders_by_position_then_id() {
        let early = record(5, Location::span("x.c", 1, 2, 1, 3));
        let late = record(1, Location::span("x.c", 3, 1, 3, 2));
        assert_eq!(early.buffer_cmp(&late), Ordering::Less);
        assert_eq!(late.buffer_cmp(&early), Ordering::Greater);

        let same_pos_a = record(1, Location::span("x.c", 2, 4, 2, 5));
        let same_pos_b = record(2, Location::span("x.c", 2, 4, 2, 5));
        assert_eq!(same_pos_a.buffer_cmp(&same_pos_b), Ordering::Less);
    }

    #[test]
    fn different_files_order_by_id() {
        let a = record(1, Location::line("a.c", 99));
        let b = record(2, Location::line("b.c", 1));
        assert_eq!(a.buffer_cmp(&b), Ordering::Less);
    }

    #[test]
    fn empty_file_names_order_by_id() {
        let a = record(3, Location::null());
        let b = record(4, Location::null());
        assert_eq!(a.buffer_cmp(&b), Ordering::Less);
        assert_eq!(b.buffer_cmp(&a), Ordering::Greater);
    }
}
