use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

#[derive(Debug, Clone)]
pub enum Operation {
    Sync,
    Download,
    Finished,
}

impl Operation {
    pub fn progress_bar_style(&self) -> Result<ProgressStyle> {
        let template = match self {
            Operation::Sync | Operation::Download => {
                "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40}] {pos}/{len} [{eta}]"
            }
            Operation::Finished => "{msg}",
        };

        ProgressStyle::with_template(template)
            .context("Failed to create progress bar style")
            .map(|style| style.progress_chars(self.progress_chars()))
    }

    pub fn action_verb(&self) -> &'static str {
        match self {
            Operation::Sync => "Resolving",
            Operation::Download => "Downloading",
            Operation::Finished => "Updated",
        }
    }

    pub fn progress_chars(&self) -> &'static str {
        "#>-"
    }

    pub fn create_progress_bar(
        &self,
        m: &MultiProgress,
        total: usize,
        message: &str,
    ) -> Result<ProgressBar> {
        let pb = m.add(ProgressBar::new(total as u64));
        pb.set_style(self.progress_bar_style()?);
        pb.set_message(format!("{} {}", self.action_verb(), message));
        Ok(pb)
    }
}

pub struct OperationManager {
    multi_progress: MultiProgress,
    main_progress: ProgressBar,
    operation: Operation,
}

impl OperationManager {
    pub fn new(operation: Operation) -> Result<Self> {
        let multi_progress = MultiProgress::new();
        let main_progress = multi_progress.add(ProgressBar::no_length());

        main_progress.set_style(
            ProgressStyle::with_template("{msg}")
                .map_err(|e| anyhow::anyhow!("Failed to create main progress style: {}", e))?,
        );
        main_progress.set_message(Self::get_main_message_by_operation(&operation));

        Ok(Self {
            multi_progress,
            main_progress,
            operation,
        })
    }

    fn get_main_message_by_operation(operation: &Operation) -> String {
        match operation {
            Operation::Sync => "Rebuilding asset cache".to_string(),
            Operation::Download => "Downloading asset files".to_string(),
            Operation::Finished => "Asset cache up to date".to_string(),
        }
    }

    pub fn finish(&self) {
        match self.operation {
            Operation::Finished => self.main_progress.finish(),
            _ => self.main_progress.finish_and_clear(),
        }
    }

    pub fn add_progress_bar(&self, total: usize, message: &str) -> Result<ProgressBar> {
        self.operation
            .create_progress_bar(&self.multi_progress, total, message)
    }
}
