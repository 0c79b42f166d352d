/*!
 * Reading, querying and rendering of Apple-style .strings files.
 *
 * The module is built around three ideas:
 * - parsing is total: malformed lines never fail, they are carried along
 *   verbatim and written back in place,
 * - every entry owns the exact text surrounding it (comment block, blank
 *   runs), so verbatim rendering is plain concatenation,
 * - all queries and updates work on one in-memory [`StringsDocument`] that
 *   is rebuilt from text on every invocation.
 */

pub mod document;
pub mod model;
pub mod parser;
pub mod writer;

pub use document::StringsDocument;
pub use model::{StringsEntry, escape_text, unescape_text};
