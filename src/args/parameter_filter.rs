use super::argument::{Argument, ExclusionSet};
use crate::codec::Codec;
use crate::context::CorrelationContext;

/// Rendered argument text for one call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredArgs {
    /// Encoded arguments, concatenated in call order without a delimiter.
    pub text: String,
    /// Remote address of the last inbound request argument, or empty.
    pub remote_origin: String,
    /// Number of arguments the call was made with, before filtering.
    pub argument_count: usize,
}

impl FilteredArgs {
    /// The call was made with no arguments at all.
    pub fn has_no_arguments(&self) -> bool {
        self.argument_count == 0
    }
}

/// Selects and renders the arguments that may appear in a log line.
#[derive(Debug, Clone, Copy)]
pub struct ParameterFilter<'c> {
    codec: &'c Codec,
}

impl<'c> ParameterFilter<'c> {
    /// Filter rendering values through `codec`.
    pub fn new(codec: &'c Codec) -> Self {
        Self { codec }
    }

    /// Copy the request id of every correlated argument into `ctx`.
    ///
    /// Excluded positions are included: hiding a value from the log does not
    /// hide its request id. When several arguments carry one, the last wins.
    /// Returns the id that was bound, if any.
    pub fn bind_correlation(&self, args: &[Argument<'_>], ctx: &CorrelationContext) -> Option<String> {
        let request_id = args.iter().filter_map(Argument::request_id).last()?;
        ctx.set_request_id(request_id);
        Some(request_id.to_string())
    }

    /// Render the non-excluded arguments.
    ///
    /// Inbound requests contribute their remote address instead of their
    /// content; outbound responses, nulls (including values that encode to
    /// `null`, such as `None`) and values the codec cannot encode are skipped.
    pub fn filter(&self, args: &[Argument<'_>], exclusions: &ExclusionSet) -> FilteredArgs {
        let mut filtered = FilteredArgs {
            argument_count: args.len(),
            ..FilteredArgs::default()
        };

        for (position, arg) in args.iter().enumerate() {
            if exclusions.contains(position) {
                continue;
            }
            if let Some(addr) = arg.remote_addr() {
                filtered.remote_origin = addr.to_string();
            }
            if let Some(text) = arg.render(self.codec).filter(|text| text != "null") {
                filtered.text.push_str(&text);
            }
        }

        filtered
    }
}
