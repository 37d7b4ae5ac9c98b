use cellar_core::{BlobStore, DashboardUseCase, DashboardView, DisplayMode, ReportStore};

pub struct App<'a, S: BlobStore> {
    usecase: DashboardUseCase<'a, S>,
    pub mode: DisplayMode,
    pub year: i32,
    pub view: Option<DashboardView>,
    pub error: Option<String>,
}

impl<'a, S: BlobStore> App<'a, S> {
    pub fn new(store: &'a ReportStore<S>, year: i32) -> Self {
        let mut app = App {
            usecase: DashboardUseCase::new(store),
            mode: DisplayMode::Monthly,
            year,
            view: None,
            error: None,
        };
        app.refresh();
        app
    }

    fn refresh(&mut self) {
        match self.usecase.view(self.mode, self.year) {
            Ok(view) => {
                self.view = Some(view);
                self.error = None;
            }
            Err(e) => {
                self.view = None;
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        if self.mode != mode {
            self.mode = mode;
            self.refresh();
        }
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggle());
    }

    /// Year navigation only applies to the annual chart.
    pub fn next_year(&mut self) {
        if self.mode == DisplayMode::Annual {
            self.year += 1;
            self.refresh();
        }
    }

    pub fn previous_year(&mut self) {
        if self.mode == DisplayMode::Annual {
            self.year -= 1;
            self.refresh();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellar_core::{MemoryBlobStore, STORAGE_KEY};

    #[test]
    fn test_mode_and_year_navigation() {
        let store = ReportStore::load(MemoryBlobStore::new(), STORAGE_KEY, 2025).unwrap();
        let mut app = App::new(&store, 2025);
        assert_eq!(app.mode, DisplayMode::Monthly);
        assert_eq!(app.view.as_ref().unwrap().series.len(), 4);

        // Year keys are ignored on the monthly chart.
        app.next_year();
        assert_eq!(app.year, 2025);

        app.toggle_mode();
        assert_eq!(app.mode, DisplayMode::Annual);
        assert_eq!(app.view.as_ref().unwrap().total, 46300.0);

        app.previous_year();
        assert_eq!(app.year, 2024);
        assert_eq!(app.view.as_ref().unwrap().total, 0.0);
        assert!(app.error.is_none());
    }
}
