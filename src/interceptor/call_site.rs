use crate::args::{Argument, ExclusionSet};
use crate::config::Category;
use crate::signature::Descriptor;

/// Per-method logging marker carrying the argument positions to hide.
///
/// # Examples
///
/// ```
/// use logprint::interceptor::LogPrint;
///
/// let marker = LogPrint::new().except([0, 2]);
/// assert!(marker.exclusions().contains(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPrint {
    except_param_index: Vec<usize>,
}

impl LogPrint {
    /// Marker that logs every argument.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the arguments at these zero-based positions.
    pub fn except(mut self, positions: impl IntoIterator<Item = usize>) -> Self {
        self.except_param_index.extend(positions);
        self
    }

    /// Hidden positions, in the order they were given.
    pub fn except_param_index(&self) -> &[usize] {
        &self.except_param_index
    }

    pub fn exclusions(&self) -> ExclusionSet {
        self.except_param_index.iter().copied().collect()
    }
}

/// Why a call is being logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Matched by its layer.
    Layer(Category),
    /// Explicitly marked with [`LogPrint`].
    Annotated(LogPrint),
}

impl Origin {
    /// Category whose severity rule applies.
    pub fn category(&self) -> Category {
        match self {
            Self::Layer(category) => *category,
            Self::Annotated(_) => Category::Annotated,
        }
    }

    /// Layer-matched calls never exclude arguments.
    pub fn exclusions(&self) -> ExclusionSet {
        match self {
            Self::Layer(_) => ExclusionSet::none(),
            Self::Annotated(marker) => marker.exclusions(),
        }
    }
}

/// One intercepted invocation: what is being called and with which arguments.
#[derive(Debug)]
pub struct CallSite<'a> {
    descriptor: Descriptor,
    args: Vec<Argument<'a>>,
    annotation: Option<LogPrint>,
    suppressed: bool,
}

impl<'a> CallSite<'a> {
    /// Call site for a signature descriptor such as
    /// `execution(String com.acme.dao.UserDao.find(Long))`.
    pub fn new(descriptor: impl Into<Descriptor>) -> Self {
        Self {
            descriptor: descriptor.into(),
            args: Vec::new(),
            annotation: None,
            suppressed: false,
        }
    }

    /// Call site for `method` declared on `type_path`.
    pub fn method(type_path: impl Into<String>, method: impl Into<String>) -> Self {
        Self::new(Descriptor::method(type_path, method))
    }

    /// Append one argument, in call order.
    pub fn arg(mut self, arg: Argument<'a>) -> Self {
        self.args.push(arg);
        self
    }

    /// Append several arguments, in call order.
    pub fn args(mut self, args: impl IntoIterator<Item = Argument<'a>>) -> Self {
        self.args.extend(args);
        self
    }

    /// Attach a [`LogPrint`] marker.
    pub fn annotated(mut self, marker: LogPrint) -> Self {
        self.annotation = Some(marker);
        self
    }

    /// Mark the method as never logged. Takes precedence over every rule.
    pub fn suppress_logging(mut self) -> Self {
        self.suppressed = true;
        self
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn arguments(&self) -> &[Argument<'a>] {
        &self.args
    }

    pub fn annotation(&self) -> Option<&LogPrint> {
        self.annotation.as_ref()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_print_exclusions() {
        let marker = LogPrint::new().except([1, 3]).except([1]);
        assert_eq!(marker.except_param_index(), &[1, 3, 1]);
        let set = marker.exclusions();
        assert_eq!(set.len(), 2);
        assert!(set.contains(3));
    }

    #[test]
    fn test_origin_category_and_exclusions() {
        let layer = Origin::Layer(Category::Queue);
        assert_eq!(layer.category(), Category::Queue);
        assert!(layer.exclusions().is_empty());

        let annotated = Origin::Annotated(LogPrint::new().except([0]));
        assert_eq!(annotated.category(), Category::Annotated);
        assert!(annotated.exclusions().contains(0));
    }

    #[test]
    fn test_call_site_builder() {
        let payload = "x";
        let site = CallSite::method("com.dao.UserDao", "find")
            .arg(Argument::value(payload))
            .args([Argument::null(), Argument::outbound()])
            .annotated(LogPrint::new())
            .suppress_logging();

        assert_eq!(site.arguments().len(), 3);
        assert!(site.annotation().is_some());
        assert!(site.is_suppressed());
        assert_eq!(site.descriptor().label(), "UserDao.find");
    }

    #[test]
    fn test_call_site_from_raw_descriptor() {
        let site = CallSite::new("execution(void com.service.Billing.charge(Long))");
        assert_eq!(site.descriptor().label(), "Billing.charge");
        assert!(!site.is_suppressed());
        assert!(site.annotation().is_none());
    }
}
