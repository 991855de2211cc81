use tracing::info;

use super::client::{SeoRequest, SeoWorkflow};
use super::decode::{decode_keyword_results, decode_write_output};
use super::types::{DesignBrief, KeywordInsight};
use crate::errors::StudioError;
use crate::services::seo_service::SeoService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Analyzing,
    Success,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteState {
    Idle,
    Writing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
    Error(String),
}

/// Drives one design's SEO round trip: dispatch the analysis, hold the
/// normalized keyword list, optionally dispatch the content-writing pass,
/// and persist the lot on explicit request. The write and save sub-states
/// are independent and only ever advanced by the caller, never
/// automatically.
pub struct SeoController {
    run: RunState,
    write: WriteState,
    save: SaveState,
    keywords: Vec<KeywordInsight>,
    generated_title: Option<String>,
    generated_description: Option<String>,
}

impl Default for SeoController {
    fn default() -> Self {
        Self::new()
    }
}

impl SeoController {
    pub fn new() -> Self {
        Self {
            run: RunState::Idle,
            write: WriteState::Idle,
            save: SaveState::Idle,
            keywords: Vec::new(),
            generated_title: None,
            generated_description: None,
        }
    }

    pub fn run_state(&self) -> &RunState {
        &self.run
    }

    pub fn write_state(&self) -> WriteState {
        self.write
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save
    }

    pub fn keywords(&self) -> &[KeywordInsight] {
        &self.keywords
    }

    pub fn generated_title(&self) -> Option<&str> {
        self.generated_title.as_deref()
    }

    pub fn generated_description(&self) -> Option<&str> {
        self.generated_description.as_deref()
    }

    /// The generated fields stay editable independently of the workflow.
    pub fn set_generated_title(&mut self, title: Option<String>) {
        self.generated_title = title;
        self.mark_dirty();
    }

    pub fn set_generated_description(&mut self, description: Option<String>) {
        self.generated_description = description;
        self.mark_dirty();
    }

    /// Edits after a save make the save action available again.
    fn mark_dirty(&mut self) {
        if self.save == SaveState::Saved {
            self.save = SaveState::Idle;
        }
    }

    /// Dispatch the analysis once and install the normalized results.
    pub async fn run_analysis(
        &mut self,
        workflow: &dyn SeoWorkflow,
        brief: &DesignBrief,
    ) -> Result<(), StudioError> {
        match self.run {
            RunState::Analyzing => return Err(StudioError::Busy),
            RunState::Success => {
                return Err(StudioError::validation("analysis already launched"))
            }
            _ => {}
        }

        self.run = RunState::Analyzing;
        match workflow.dispatch(&SeoRequest::analyse(brief)).await {
            Ok(body) => {
                self.keywords = decode_keyword_results(&body);
                info!("Analysis returned {} keywords", self.keywords.len());
                self.run = RunState::Success;
                self.save = SaveState::Idle;
                Ok(())
            }
            Err(err) => {
                self.run = RunState::Error(err.to_string());
                Err(err)
            }
        }
    }

    /// Dispatch the content-writing pass over the current keyword list.
    /// Allowed once per successful analysis; a failed attempt may be
    /// retried.
    pub async fn run_write(
        &mut self,
        workflow: &dyn SeoWorkflow,
        brief: &DesignBrief,
    ) -> Result<(), StudioError> {
        if self.run != RunState::Success {
            return Err(StudioError::validation("no analysis results to write from"));
        }
        match self.write {
            WriteState::Writing => return Err(StudioError::Busy),
            WriteState::Done => {
                return Err(StudioError::validation("content already generated"))
            }
            WriteState::Idle => {}
        }

        self.write = WriteState::Writing;
        let request = SeoRequest::write(brief, self.keywords.clone());
        match workflow.dispatch(&request).await {
            Ok(body) => {
                let copy = decode_write_output(&body);
                if copy.title.is_some() {
                    self.generated_title = copy.title;
                }
                if copy.description.is_some() {
                    self.generated_description = copy.description;
                }
                self.write = WriteState::Done;
                self.mark_dirty();
                Ok(())
            }
            Err(err) => {
                self.write = WriteState::Idle;
                Err(err)
            }
        }
    }

    /// Persist the current results for `design_id`. Refused while a save is
    /// running or when the state on screen is already persisted.
    pub async fn save(&mut self, seo: &SeoService, design_id: &str) -> Result<(), StudioError> {
        if self.run != RunState::Success {
            return Err(StudioError::validation("no analysis results to save"));
        }
        match self.save {
            SaveState::Saving => return Err(StudioError::Busy),
            SaveState::Saved => return Err(StudioError::validation("results already saved")),
            SaveState::Idle | SaveState::Error(_) => {}
        }

        self.save = SaveState::Saving;
        let result = seo
            .save_results(
                design_id,
                &self.keywords,
                self.generated_title.as_deref(),
                self.generated_description.as_deref(),
            )
            .await;
        match result {
            Ok(_) => {
                self.save = SaveState::Saved;
                Ok(())
            }
            Err(err) => {
                self.save = SaveState::Error(err.to_string());
                Err(err)
            }
        }
    }

    /// Restore a previously persisted analysis on page entry. When one
    /// exists the controller lands directly in the success/saved state, so
    /// the save action starts out disabled.
    pub async fn load_existing(
        &mut self,
        seo: &SeoService,
        design_id: &str,
    ) -> Result<bool, StudioError> {
        let Some(stored) = seo.load_existing(design_id).await? else {
            return Ok(false);
        };

        self.keywords = stored.keywords;
        self.generated_title = stored.analysis.generated_title.clone();
        self.generated_description = stored.analysis.generated_description.clone();
        self.run = RunState::Success;
        self.save = SaveState::Saved;
        Ok(true)
    }
}
