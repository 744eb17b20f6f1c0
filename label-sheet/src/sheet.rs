//! Drives a whole render job: placement, page breaks, slot drawing and the
//! final hand-off to the backend.

use crate::backend::RenderBackend;
use crate::config::SheetConfig;
use crate::error::Result;
use crate::grid;
use crate::record::ProductRecord;
use crate::slot;

/// Lifecycle of a render job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Paginating,
    Finalized,
}

/// What a finished job produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderSummary {
    pub records: usize,
    pub pages: usize,
    pub page_breaks: usize,
    /// Fields replaced by their defaults across all records.
    pub substitutions: usize,
}

/// One render job over one configuration and one backend.
pub struct SheetComposer<'a, B: RenderBackend> {
    config: &'a SheetConfig,
    backend: &'a mut B,
    state: JobState,
    record_index: usize,
    summary: RenderSummary,
}

impl<'a, B: RenderBackend> SheetComposer<'a, B> {
    /// Validate `config` and bind the job to `backend`. An invalid
    /// configuration fails here, before the backend sees anything.
    pub fn new(config: &'a SheetConfig, backend: &'a mut B) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            backend,
            state: JobState::Idle,
            record_index: 0,
            summary: RenderSummary::default(),
        })
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Render every record in order, then finalize the backend.
    ///
    /// The backend is finalized exactly once, also when a record or a
    /// drawing call fails midway; the first error is returned.
    pub fn run<'r, I>(mut self, records: I) -> Result<RenderSummary>
    where
        I: IntoIterator<Item = &'r ProductRecord>,
    {
        tracing::info!(
            slots_per_page = self.config.slots_per_page(),
            "starting label job"
        );

        let drawn = records
            .into_iter()
            .try_for_each(|record| {
                let index = self.record_index;
                self.draw_record(record).map_err(|e| e.at_record(index))
            });

        self.state = JobState::Finalized;
        let finalized = self.backend.finalize();

        match (drawn, finalized) {
            (Err(e), finalized) => {
                if let Err(close_error) = finalized {
                    tracing::warn!(error = %close_error, "finalize failed after aborted job");
                }
                tracing::warn!(record = self.record_index, error = %e, "label job aborted");
                Err(e)
            }
            (Ok(()), Err(e)) => Err(e),
            (Ok(()), Ok(())) => {
                tracing::info!(
                    records = self.summary.records,
                    pages = self.summary.pages,
                    substitutions = self.summary.substitutions,
                    "label job finished"
                );
                Ok(self.summary)
            }
        }
    }

    fn draw_record(&mut self, record: &ProductRecord) -> Result<()> {
        let placement = grid::resolve(self.record_index, self.config);

        if self.state == JobState::Idle {
            self.state = JobState::Paginating;
            self.summary.pages = 1;
        } else if placement.starts_new_page() {
            self.backend.page_break()?;
            self.summary.page_breaks += 1;
            self.summary.pages += 1;
            tracing::debug!(page = placement.page_index, "page break");
        }

        let text = record.resolve(self.record_index, self.config)?;
        self.summary.substitutions += text.substitutions.len();

        tracing::debug!(
            record = self.record_index,
            page = placement.page_index,
            row = placement.row_index,
            column = placement.column_index,
            "drawing slot"
        );
        for op in slot::compose_text(&text, &placement, self.config) {
            self.backend.apply(&op)?;
        }

        self.record_index += 1;
        self.summary.records += 1;
        Ok(())
    }
}

/// Render `records` onto `backend` with `config` in a single job.
pub fn render_labels<'r, I, B>(
    records: I,
    config: &SheetConfig,
    backend: &mut B,
) -> Result<RenderSummary>
where
    I: IntoIterator<Item = &'r ProductRecord>,
    B: RenderBackend,
{
    SheetComposer::new(config, backend)?.run(records)
}
