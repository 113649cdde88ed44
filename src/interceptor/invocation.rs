use super::call_site::{CallSite, Origin};
use super::line;
use crate::args::{ExclusionSet, ParameterFilter};
use crate::codec::Codec;
use crate::config::{CategoryMatcher, LoggingRules};
use crate::context::CorrelationContext;
use crate::router::SeverityRouter;
use crate::sink::{LogSink, TracingSink};
use serde::Serialize;
use std::future::Future;
use std::time::Instant;
use tracing::info;

/// Wraps calls with start/end log lines.
///
/// The interceptor never changes the outcome of the wrapped call: `Err`
/// values and panics reach the caller untouched, and nothing that goes wrong
/// while rendering a line is reported to the caller.
///
/// # Examples
///
/// ```
/// use logprint::args::Argument;
/// use logprint::config::{Category, LoggingRules};
/// use logprint::interceptor::{CallSite, Interceptor, Origin};
/// use logprint::sink::MemorySink;
///
/// let sink = MemorySink::new();
/// let interceptor = Interceptor::with_sink(LoggingRules::default(), sink.clone());
///
/// let user_id = 7u64;
/// let site = CallSite::method("com.dao.UserDao", "find").arg(Argument::value(&user_id));
/// let name: Result<String, std::io::Error> =
///     interceptor.intercept(&site, &Origin::Layer(Category::Dao), || Ok("bob".to_string()));
///
/// assert_eq!(name.unwrap(), "bob");
/// let lines = sink.messages();
/// assert_eq!(lines[0], "UserDao.find--[@@START@@],args:[7]");
/// assert!(lines[1].starts_with("UserDao.find-[@@END@@],args:[7],result:[\"bob\"],elapsedMs:["));
/// ```
pub struct Interceptor<S = TracingSink> {
    rules: LoggingRules,
    codec: Codec,
    matcher: CategoryMatcher,
    router: SeverityRouter<S>,
}

impl Interceptor<TracingSink> {
    /// Interceptor writing to the `tracing` facade.
    pub fn new(rules: LoggingRules) -> Self {
        Self::with_sink(rules, TracingSink::new())
    }

    /// Interceptor using the process-wide [`LoggingRules::global`] rules.
    pub fn from_global() -> Self {
        Self::new(*LoggingRules::global())
    }
}

impl<S: LogSink> Interceptor<S> {
    /// Interceptor writing to `sink`, with the default codec and layer matcher.
    pub fn with_sink(rules: LoggingRules, sink: S) -> Self {
        info!(?rules, "LogPrint interceptor initialized");
        Self {
            rules,
            codec: Codec::default(),
            matcher: CategoryMatcher::new(),
            router: SeverityRouter::new(sink),
        }
    }

    /// Replace the codec used to render arguments and results.
    pub fn with_codec(mut self, codec: Codec) -> Self {
        self.codec = codec;
        self
    }

    /// Replace the layer matcher used by [`Interceptor::intercept_matched`].
    pub fn with_matcher(mut self, matcher: CategoryMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Severity rules in effect.
    pub fn rules(&self) -> &LoggingRules {
        &self.rules
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    /// The sink lines are written to.
    pub fn sink(&self) -> &S {
        self.router.sink()
    }

    /// Why `site` would be logged: its [`LogPrint`](super::LogPrint) marker first,
    /// then its layer. `None` if neither applies.
    pub fn resolve_origin(&self, site: &CallSite<'_>) -> Option<Origin> {
        if let Some(marker) = site.annotation() {
            return Some(Origin::Annotated(marker.clone()));
        }
        site.descriptor()
            .declaring_type()
            .and_then(|type_path| self.matcher.resolve(&type_path))
            .map(Origin::Layer)
    }

    /// Run `call`, logging it under `origin`.
    pub fn intercept<R, E, F>(&self, site: &CallSite<'_>, origin: &Origin, call: F) -> Result<R, E>
    where
        R: Serialize,
        F: FnOnce() -> Result<R, E>,
    {
        let mut pending = self.begin(site, origin);
        let outcome = call();
        if let (Some(pending), Ok(value)) = (pending.as_mut(), &outcome) {
            pending.record_result(value);
        }
        outcome
    }

    /// Async form of [`Interceptor::intercept`].
    ///
    /// The end line is also written if the returned future is dropped before
    /// completion.
    ///
    /// Outside [`CorrelationContext::scope`] the call runs in a fork of the
    /// current context, so a request id bound here stays with this call chain
    /// even when the task resumes on another worker thread. The fork is not
    /// copied back to the caller's context.
    pub async fn intercept_async<R, E, F, Fut>(&self, site: &CallSite<'_>, origin: &Origin, call: F) -> Result<R, E>
    where
        R: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        if CorrelationContext::is_scoped() {
            self.run_async(site, origin, call).await
        } else {
            CorrelationContext::current()
                .fork()
                .scope(self.run_async(site, origin, call))
                .await
        }
    }

    async fn run_async<R, E, F, Fut>(&self, site: &CallSite<'_>, origin: &Origin, call: F) -> Result<R, E>
    where
        R: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        let mut pending = self.begin(site, origin);
        let outcome = call().await;
        if let (Some(pending), Ok(value)) = (pending.as_mut(), &outcome) {
            pending.record_result(value);
        }
        outcome
    }

    /// Run `call`, logging it only if [`Interceptor::resolve_origin`] finds a reason to.
    pub fn intercept_matched<R, E, F>(&self, site: &CallSite<'_>, call: F) -> Result<R, E>
    where
        R: Serialize,
        F: FnOnce() -> Result<R, E>,
    {
        match self.resolve_origin(site) {
            Some(origin) => self.intercept(site, &origin, call),
            None => call(),
        }
    }

    /// Async form of [`Interceptor::intercept_matched`].
    pub async fn intercept_matched_async<R, E, F, Fut>(&self, site: &CallSite<'_>, call: F) -> Result<R, E>
    where
        R: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, E>>,
    {
        match self.resolve_origin(site) {
            Some(origin) => self.intercept_async(site, &origin, call).await,
            None => call().await,
        }
    }

    fn begin<'s, 'a>(&self, site: &'s CallSite<'a>, origin: &Origin) -> Option<PendingEnd<'_, 's, 'a, S>> {
        if site.is_suppressed() {
            return None;
        }

        let started = Instant::now();
        let exclusions = origin.exclusions();
        let level = self.rules.level_for(origin.category());
        let label = site.descriptor().label();

        let context = CorrelationContext::current();
        let filter = ParameterFilter::new(&self.codec);
        filter.bind_correlation(site.arguments(), &context);
        let args = filter.filter(site.arguments(), &exclusions);
        let start = line::start_line(&label, &args);
        context.clone().sync_scope(|| self.router.dispatch(level, &start));

        Some(PendingEnd {
            interceptor: self,
            context,
            site,
            label,
            level,
            exclusions,
            started,
            result: None,
        })
    }
}

/// Writes the end line when dropped, whatever the wrapped call did.
struct PendingEnd<'i, 's, 'a, S: LogSink> {
    interceptor: &'i Interceptor<S>,
    // Both lines are dispatched under the context the call started with.
    context: CorrelationContext,
    site: &'s CallSite<'a>,
    label: String,
    level: i32,
    exclusions: ExclusionSet,
    started: Instant,
    result: Option<String>,
}

impl<S: LogSink> PendingEnd<'_, '_, '_, S> {
    fn record_result<R: Serialize>(&mut self, value: &R) {
        self.result = self
            .interceptor
            .codec
            .encode(value)
            .filter(|text| text != "null");
    }
}

impl<S: LogSink> Drop for PendingEnd<'_, '_, '_, S> {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_millis();
        // Arguments are rendered again; the call may have changed them.
        let args = ParameterFilter::new(&self.interceptor.codec).filter(self.site.arguments(), &self.exclusions);
        let end = line::end_line(&self.label, &args, self.result.as_deref(), elapsed_ms);
        let router = &self.interceptor.router;
        let level = self.level;
        self.context.clone().sync_scope(|| router.dispatch(level, &end));
    }
}
