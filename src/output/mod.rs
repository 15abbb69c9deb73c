//! Writing a reconciliation to disk.
//!
//! Produces the canonical `chapter_NNNN.txt` files plus three logs:
//!
//! | Log | Format | Contents |
//! |-----|--------|----------|
//! | merge log  | JSON array  | one record per merged chapter |
//! | rename log | JSON object | original TXT filename -> canonical filename |
//! | error log  | plain text  | one issue per line; absent when there are none |

pub mod writer;
