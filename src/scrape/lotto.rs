// src/scrape/lotto.rs
use crate::{
    config::options::{SourcePlan, SourceSpec, clamp_limit},
    core::{dom::Document, net::{HttpLoader, Loader}},
    model::{DrawRecord, ErrorMap, Fetched, JackpotRecord, PreviousDraws, UnifiedResult},
    specs,
    trace::{SourceTagged, TraceEntry, TraceSink, emit, reborrow},
};

/// What the fallback loop needs to know about a field's value.
pub trait Sourced: Default {
    /// Good enough to stop trying further sources.
    fn accepted(&self) -> bool;

    fn set_source(&mut self, name: &str);
}

impl Sourced for JackpotRecord {
    fn accepted(&self) -> bool {
        self.is_complete()
    }

    fn set_source(&mut self, name: &str) {
        self.source = Some(s!(name));
    }
}

impl Sourced for DrawRecord {
    fn accepted(&self) -> bool {
        self.is_complete()
    }

    fn set_source(&mut self, name: &str) {
        self.source = Some(s!(name));
    }
}

impl Sourced for PreviousDraws {
    fn accepted(&self) -> bool {
        !self.draws.is_empty()
    }

    fn set_source(&mut self, name: &str) {
        self.source = Some(s!(name));
        for d in &mut self.draws {
            d.set_source(name);
        }
    }
}

impl Sourced for UnifiedResult {
    fn accepted(&self) -> bool {
        self.is_complete()
    }

    fn set_source(&mut self, name: &str) {
        if let Some(latest) = self.latest.as_mut() {
            latest.set_source(name);
        }
        self.previous.set_source(name);
    }
}

/// Multi-source front door. Every operation walks its field's sources in
/// order and returns the first accepted value; it never fails, it only comes
/// back empty with the reasons in `errors`.
pub struct Lotto<L: Loader> {
    loader: L,
    plan: SourcePlan,
}

impl Lotto<HttpLoader> {
    /// Built-in mirrors over HTTP.
    pub fn http() -> Self {
        Self::new(HttpLoader::new())
    }
}

impl<L: Loader> Lotto<L> {
    pub fn new(loader: L) -> Self {
        Self::with_plan(loader, SourcePlan::default())
    }

    pub fn with_plan(loader: L, plan: SourcePlan) -> Self {
        Self { loader, plan }
    }

    pub fn plan(&self) -> &SourcePlan {
        &self.plan
    }

    pub fn get_jackpot(&self) -> Fetched<JackpotRecord> {
        self.get_jackpot_traced(None)
    }

    pub fn get_jackpot_traced(&self, trace: Option<&mut dyn TraceSink>) -> Fetched<JackpotRecord> {
        self.first_accepted("jackpot", &self.plan.jackpot, trace, specs::jackpot_from)
    }

    pub fn get_latest_draw(&self) -> Fetched<DrawRecord> {
        self.get_latest_draw_traced(None)
    }

    pub fn get_latest_draw_traced(&self, trace: Option<&mut dyn TraceSink>) -> Fetched<DrawRecord> {
        self.first_accepted("latest", &self.plan.latest, trace, specs::latest_from)
    }

    pub fn get_previous_draws(&self, limit: usize, exclude_date: Option<&str>) -> Fetched<PreviousDraws> {
        self.get_previous_draws_traced(limit, exclude_date, None)
    }

    pub fn get_previous_draws_traced(
        &self,
        limit: usize,
        exclude_date: Option<&str>,
        trace: Option<&mut dyn TraceSink>,
    ) -> Fetched<PreviousDraws> {
        self.get_previous_draws_excluding(limit, exclude_date.as_slice(), trace)
    }

    /// Archive draws skipping every day in `excluded`; skipped draws do not
    /// count against `limit`.
    pub fn get_previous_draws_excluding(
        &self,
        limit: usize,
        excluded: &[&str],
        trace: Option<&mut dyn TraceSink>,
    ) -> Fetched<PreviousDraws> {
        let limit = clamp_limit(limit);
        self.first_accepted("previous", &self.plan.previous, trace, |doc, spec, t| {
            specs::previous_excluding(doc, spec, limit, excluded, t)
        })
    }

    pub fn get_unified_results(&self, limit: usize) -> Fetched<UnifiedResult> {
        self.get_unified_results_traced(limit, None)
    }

    pub fn get_unified_results_traced(&self, limit: usize, trace: Option<&mut dyn TraceSink>) -> Fetched<UnifiedResult> {
        self.get_unified_results_excluding(limit, &[], trace)
    }

    /// Unified results whose archive also skips the days in `excluded`.
    pub fn get_unified_results_excluding(
        &self,
        limit: usize,
        excluded: &[&str],
        trace: Option<&mut dyn TraceSink>,
    ) -> Fetched<UnifiedResult> {
        let limit = clamp_limit(limit);
        self.first_accepted("unified", &self.plan.unified, trace, |doc, spec, t| {
            specs::unified_from(doc, spec, limit, excluded, t)
        })
    }

    /// The fallback loop shared by every field.
    fn first_accepted<T, F>(
        &self,
        field: &str,
        sources: &[SourceSpec],
        mut trace: Option<&mut dyn TraceSink>,
        read: F,
    ) -> Fetched<T>
    where
        T: Sourced,
        F: Fn(&dyn Document, &SourceSpec, Option<&mut dyn TraceSink>) -> T,
    {
        let mut errors = ErrorMap::new();

        for spec in sources {
            logd!("Lotto: {field} trying {} ({})", spec.name, spec.url);

            let doc = match self.loader.fetch(&spec.url) {
                Ok(doc) => doc,
                Err(e) => {
                    logw!("Lotto: {field}: {} failed: {e}", spec.name);
                    emit(&mut trace, || TraceEntry::new("source", &e.to_string()).label(field).source(&spec.name));
                    errors.insert(spec.name.clone(), e.to_string());
                    continue;
                }
            };

            let mut value = match reborrow(&mut trace) {
                Some(inner) => {
                    let mut tagged = SourceTagged { source: &spec.name, inner };
                    let sink: &mut dyn TraceSink = &mut tagged;
                    read(doc.as_ref(), spec, Some(sink))
                }
                None => read(doc.as_ref(), spec, None),
            };

            if value.accepted() {
                logf!("Lotto: {field} from {}", spec.name);
                emit(&mut trace, || TraceEntry::new("source", "accepted").label(field).source(&spec.name));
                value.set_source(&spec.name);
                return Fetched { value, errors };
            }

            logd!("Lotto: {field}: {} gave no complete result", spec.name);
            emit(&mut trace, || TraceEntry::new("source", "rejected").label(field).source(&spec.name));
            errors.insert(spec.name.clone(), join!("no complete ", field, " on page"));
        }

        if sources.is_empty() {
            logw!("Lotto: no sources configured for {field}");
        } else {
            logw!("Lotto: {field} exhausted {} source(s)", sources.len());
        }
        Fetched { value: T::default(), errors }
    }
}
