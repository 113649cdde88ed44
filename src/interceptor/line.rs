//! Start/end line rendering.
//!
//! Lines are consumed by log scrapers, so their shape is fixed:
//!
//! ```text
//! <label>-<remoteOrigin>-[@@START@@],args:[<args>]
//! <label>-[@@END@@],args:[<args>],result:[<result>],elapsedMs:[<n>]
//! ```
//!
//! A call made with no arguments at all renders `<label>-[@@START@@]` on entry
//! and `args:[null]` on exit; a call whose arguments were all filtered out
//! renders `args:[]`.

use crate::args::FilteredArgs;

pub const START_MARKER: &str = "[@@START@@]";
pub const END_MARKER: &str = "[@@END@@]";
pub const NO_ARGS_MARKER: &str = "null";

pub fn start_line(label: &str, args: &FilteredArgs) -> String {
    if args.has_no_arguments() {
        return format!("{}-{}", label, START_MARKER);
    }
    format!(
        "{}-{}-{},args:[{}]",
        label, args.remote_origin, START_MARKER, args.text
    )
}

pub fn end_line(label: &str, args: &FilteredArgs, result: Option<&str>, elapsed_ms: u128) -> String {
    let arg_text = if args.has_no_arguments() {
        NO_ARGS_MARKER
    } else {
        args.text.as_str()
    };

    match result {
        Some(result) => format!(
            "{}-{},args:[{}],result:[{}],elapsedMs:[{}]",
            label, END_MARKER, arg_text, result, elapsed_ms
        ),
        None => format!(
            "{}-{},args:[{}],elapsedMs:[{}]",
            label, END_MARKER, arg_text, elapsed_ms
        ),
    }
}
