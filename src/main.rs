use clap::Parser;
use iced::widget::image::Handle;
use iced::widget::{button, column, container, horizontal_space, row, stack, text, Space};
use iced::{Alignment, Element, Event, Length, Subscription, Task, Theme};
use iced_aw::Wrap;
use image::RgbaImage;
use rfd::{AsyncFileDialog, FileDialog};
use std::path::PathBuf;
use std::sync::Arc;

// Declare the application modules
mod disk;
mod export;
mod render;
mod settings;
mod state;

use disk::DiskError;
use export::{ExportJob, ExportQueue};
use settings::Settings;
use state::params::{
    AspectRatio, FillColor, ProcessParams, DEFAULT_FILENAME, MAX_SECTION_COUNT, PALETTE,
};
use state::session::{DialogStyle, RenderPhase, RenderedOutput, Session};

/// Pad, rotate and split photos into equal panels for seamless
/// multi-image posts
#[derive(Parser, Debug)]
#[command(name = "panosplit", version)]
struct Cli {
    /// Image file to open at startup
    image: Option<PathBuf>,
}

/// A successfully decoded import
#[derive(Debug, Clone)]
struct LoadedSource {
    image: Arc<RgbaImage>,
    display_name: String,
}

/// How one export job ended
#[derive(Debug, Clone)]
enum JobOutcome {
    Saved,
    Cancelled,
    Failed(String),
}

/// Which option grid is visible below the preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionCategory {
    AspectRatio,
    FillColor,
    Sections,
}

/// Main application state
struct PanoSplit {
    /// Source image and derived outputs
    session: Session,
    /// Current processing parameter snapshot
    params: ProcessParams,
    /// Separator color fed to the preview stage (the app background)
    line_color: [u8; 4],
    dark_theme: bool,
    /// Preview of the latest render, ready for display
    preview: Option<Handle>,
    dialog: DialogStyle,
    queue: ExportQueue,
    category: OptionCategory,
    settings: Settings,
    /// Last error shown in the error dialog
    error_message: String,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Pick Image" button
    ImportRequested,
    /// Background decode completed
    SourceLoaded(Result<LoadedSource, DiskError>),
    /// Background render pass completed with the paired outputs
    RenderFinished(Result<RenderedOutput, String>),
    AspectSelected(AspectRatio),
    ColorSelected(FillColor),
    RotateRequested,
    SectionsSelected(u32),
    CategorySelected(OptionCategory),
    ViewportResized(f32, f32),
    ThemeToggled,
    /// User clicked the "Export" button
    ExportRequested,
    /// The save dialog / encode for one job finished
    ExportJobFinished(JobOutcome),
    DismissDialog,
    SettingsSaved(Result<(), String>),
}

impl PanoSplit {
    /// Create a new instance of the application
    fn new(launch_image: Option<PathBuf>, settings: Settings) -> (Self, Task<Message>) {
        let params = ProcessParams {
            bg_color: settings.fill_color(),
            ..ProcessParams::default()
        };
        let dark_theme = settings.dark_theme;

        let app = PanoSplit {
            session: Session::default(),
            params,
            line_color: theme_background(dark_theme),
            dark_theme,
            preview: None,
            dialog: DialogStyle::None,
            queue: ExportQueue::new(),
            category: OptionCategory::AspectRatio,
            settings,
            error_message: String::new(),
            status: "Pick an image to begin.".to_string(),
        };

        let task = match launch_image {
            Some(path) => Task::perform(load_source(path), Message::SourceLoaded),
            None => Task::none(),
        };

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ImportRequested => {
                // Show the native file picker dialog
                let file = FileDialog::new()
                    .set_title("Pick an image")
                    .add_filter(
                        "Images",
                        &["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"],
                    )
                    .pick_file();

                if let Some(path) = file {
                    self.status = format!("Loading {}...", path.display());
                    return Task::perform(load_source(path), Message::SourceLoaded);
                }

                Task::none()
            }
            Message::SourceLoaded(Ok(source)) => {
                log::info!(
                    "📷 Imported {} ({}x{})",
                    source.display_name,
                    source.image.width(),
                    source.image.height()
                );

                // Transform choices reset with every import; fill color and
                // viewport carry over.
                self.params = self.params.reset_for_import();
                self.session.set_source(source.image, source.display_name);
                self.status = String::new();
                self.start_render()
            }
            Message::SourceLoaded(Err(e)) => {
                log::error!("import failed: {}", e);
                self.session.clear();
                self.preview = None;
                self.status = "Could not read that image.".to_string();
                Task::none()
            }
            Message::RenderFinished(Ok(output)) => {
                self.preview = Some(Handle::from_rgba(
                    output.lores.width(),
                    output.lores.height(),
                    output.lores.as_raw().clone(),
                ));
                self.session.store_output(output);
                Task::none()
            }
            Message::RenderFinished(Err(e)) => {
                log::error!("render failed: {}", e);
                self.status = "Processing failed.".to_string();
                Task::none()
            }
            Message::AspectSelected(ratio) => {
                // Auto is resolved against the loaded image right here; the
                // pipeline only ever sees Original or a concrete Value.
                let resolved = if ratio == AspectRatio::Auto {
                    match &self.session.source {
                        Some(source) => render::geometry::best_fit_ratio(
                            source.image.width(),
                            source.image.height(),
                        ),
                        None => AspectRatio::Original,
                    }
                } else {
                    ratio
                };
                self.params.aspect_ratio = resolved;
                self.start_render()
            }
            Message::ColorSelected(fill) => {
                self.params.bg_color = fill;
                self.settings.fill_color = fill.label.to_string();
                Task::batch([self.start_render(), self.save_settings()])
            }
            Message::RotateRequested => {
                self.params.turns = self.params.turns.increase();
                self.start_render()
            }
            Message::SectionsSelected(count) => {
                self.params.section_count = count;
                self.start_render()
            }
            Message::CategorySelected(category) => {
                self.category = category;
                Task::none()
            }
            Message::ViewportResized(width, height) => {
                self.params.screen_dimensions = (width, height);
                self.start_render()
            }
            Message::ThemeToggled => {
                self.dark_theme = !self.dark_theme;
                self.line_color = theme_background(self.dark_theme);
                self.settings.dark_theme = self.dark_theme;
                Task::batch([self.start_render(), self.save_settings()])
            }
            Message::ExportRequested => {
                if self.dialog == DialogStyle::Busy || !self.queue.is_empty() {
                    log::warn!("export already in progress");
                    return Task::none();
                }
                let (Some(source), Some(output)) = (&self.session.source, &self.session.output)
                else {
                    return Task::none();
                };

                self.queue.populate(
                    &output.hires,
                    self.params.section_count,
                    &source.display_name,
                );
                self.dialog = DialogStyle::Busy;
                self.dispatch_next_export()
            }
            Message::ExportJobFinished(JobOutcome::Saved) => self.dispatch_next_export(),
            Message::ExportJobFinished(JobOutcome::Cancelled) => {
                log::info!("export cancelled from the save dialog");
                self.queue.clear();
                self.dialog = DialogStyle::None;
                self.status = "Export cancelled.".to_string();
                Task::none()
            }
            Message::ExportJobFinished(JobOutcome::Failed(reason)) => {
                log::error!("export failed: {}", reason);
                self.queue.clear();
                self.error_message = reason;
                self.dialog = DialogStyle::Error;
                Task::none()
            }
            Message::DismissDialog => {
                self.dialog = DialogStyle::None;
                Task::none()
            }
            Message::SettingsSaved(Ok(())) => Task::none(),
            Message::SettingsSaved(Err(e)) => {
                log::warn!("could not save settings: {}", e);
                Task::none()
            }
        }
    }

    /// Launch a full pipeline pass for the current source and parameters.
    /// In-flight passes are not cancelled; the last one to finish wins.
    fn start_render(&mut self) -> Task<Message> {
        let Some(source) = &self.session.source else {
            return Task::none();
        };
        let image = source.image.clone();
        let params = self.params.clone();
        let line_color = self.line_color;

        self.session.phase = RenderPhase::Rendering;
        Task::perform(
            render_pipeline(image, params, line_color),
            Message::RenderFinished,
        )
    }

    /// Hand the next queued job to the save dialog, or wind down the export
    fn dispatch_next_export(&mut self) -> Task<Message> {
        match self.queue.next_job() {
            Some(job) => Task::perform(run_export_job(job), Message::ExportJobFinished),
            None => {
                log::info!("✅ All exports saved");
                self.dialog = DialogStyle::None;
                self.status = "Export complete.".to_string();
                Task::none()
            }
        }
    }

    fn save_settings(&self) -> Task<Message> {
        Task::perform(self.settings.clone().save(), Message::SettingsSaved)
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut actions = row![button("Pick Image").on_press(Message::ImportRequested)].spacing(10);
        if self.session.output_available() {
            actions = actions.push(button("Export").on_press(Message::ExportRequested));
            actions = actions.push(button("Rotate").on_press(Message::RotateRequested));
        }
        let theme_label = if self.dark_theme { "Light mode" } else { "Dark mode" };
        let actions = actions
            .push(horizontal_space())
            .push(button(theme_label).on_press(Message::ThemeToggled));

        let display: Element<Message> = match &self.preview {
            Some(handle) => iced::widget::image(handle.clone()).into(),
            None => text("No image loaded").size(20).into(),
        };
        let display = container(display)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill);

        let tabs = row![
            button("Aspect ratio").on_press(Message::CategorySelected(OptionCategory::AspectRatio)),
            button("Fill color").on_press(Message::CategorySelected(OptionCategory::FillColor)),
            button("Sections").on_press(Message::CategorySelected(OptionCategory::Sections)),
        ]
        .spacing(10);

        let status_line = match self.session.phase {
            RenderPhase::Rendering => "Rendering...".to_string(),
            _ => self.status.clone(),
        };

        let base = column![
            actions,
            display,
            tabs,
            self.option_grid(),
            text(status_line).size(14),
        ]
        .spacing(12)
        .padding(16);

        match self.dialog {
            DialogStyle::None => base.into(),
            DialogStyle::Busy => {
                let panel = column![
                    text("Exporting...").size(20),
                    text(format!("{} file(s) queued", self.queue.len())),
                ]
                .spacing(10)
                .align_x(Alignment::Center);
                stack![base, dialog_overlay(panel.into())].into()
            }
            DialogStyle::Error => {
                let panel = column![
                    text("Export failed").size(20),
                    text(self.error_message.clone()),
                    button("Dismiss").on_press(Message::DismissDialog),
                ]
                .spacing(10)
                .align_x(Alignment::Center);
                stack![base, dialog_overlay(panel.into())].into()
            }
        }
    }

    /// The option grid for the selected category
    fn option_grid(&self) -> Element<Message> {
        match self.category {
            OptionCategory::AspectRatio => {
                let buttons: Vec<Element<Message>> = AspectRatio::ALL
                    .iter()
                    .map(|ratio| {
                        button(text(ratio.label()))
                            .on_press(Message::AspectSelected(*ratio))
                            .into()
                    })
                    .collect();
                Wrap::with_elements(buttons)
                    .spacing(6.0)
                    .line_spacing(6.0)
                    .into()
            }
            OptionCategory::FillColor => {
                let buttons: Vec<Element<Message>> = PALETTE
                    .iter()
                    .map(|fill| {
                        let color =
                            iced::Color::from_rgb8(fill.rgba[0], fill.rgba[1], fill.rgba[2]);
                        button(container(Space::new(36.0, 18.0)).style(move |_theme: &Theme| {
                            container::Style {
                                background: Some(color.into()),
                                ..container::Style::default()
                            }
                        }))
                        .on_press(Message::ColorSelected(*fill))
                        .into()
                    })
                    .collect();
                Wrap::with_elements(buttons)
                    .spacing(6.0)
                    .line_spacing(6.0)
                    .into()
            }
            OptionCategory::Sections => {
                let buttons: Vec<Element<Message>> = (1..=MAX_SECTION_COUNT)
                    .map(|count| {
                        button(text(count.to_string()))
                            .on_press(Message::SectionsSelected(count))
                            .into()
                    })
                    .collect();
                Wrap::with_elements(buttons)
                    .spacing(6.0)
                    .line_spacing(6.0)
                    .into()
            }
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.dark_theme {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(handle_event)
    }
}

/// Translate window events into viewport updates for the preview stage
fn handle_event(
    event: Event,
    _status: iced::event::Status,
    _window: iced::window::Id,
) -> Option<Message> {
    match event {
        Event::Window(iced::window::Event::Resized(size)) => {
            Some(Message::ViewportResized(size.width, size.height))
        }
        _ => None,
    }
}

/// Centered panel over a dimmed backdrop, used for the busy/error dialogs
fn dialog_overlay(content: Element<Message>) -> Element<Message> {
    container(
        container(content)
            .padding(24)
            .style(|theme: &Theme| container::Style {
                background: Some(theme.palette().background.into()),
                ..container::Style::default()
            }),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .center_x(Length::Fill)
    .center_y(Length::Fill)
    .style(|_theme: &Theme| container::Style {
        background: Some(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.6).into()),
        ..container::Style::default()
    })
    .into()
}

/// The app background for the current theme, used as the separator color
fn theme_background(dark: bool) -> [u8; 4] {
    let palette = if dark {
        Theme::Dark.palette()
    } else {
        Theme::Light.palette()
    };
    [
        (palette.background.r * 255.0).round() as u8,
        (palette.background.g * 255.0).round() as u8,
        (palette.background.b * 255.0).round() as u8,
        (palette.background.a * 255.0).round() as u8,
    ]
}

fn main() -> iced::Result {
    env_logger::init();
    let cli = Cli::parse();
    let settings = Settings::load();

    iced::application("PanoSplit", PanoSplit::update, PanoSplit::view)
        .theme(PanoSplit::theme)
        .subscription(PanoSplit::subscription)
        .centered()
        .run_with(move || PanoSplit::new(cli.image, settings))
}

/// Async function to decode an imported image.
/// Runs on a background task to avoid blocking the UI.
async fn load_source(path: PathBuf) -> Result<LoadedSource, DiskError> {
    let display_name = disk::display_name(&path).unwrap_or_else(|| DEFAULT_FILENAME.to_string());
    let image = disk::load_image(path).await?;

    Ok(LoadedSource {
        image: Arc::new(image),
        display_name,
    })
}

/// Run the full pipeline off the UI thread and return the paired outputs
async fn render_pipeline(
    source: Arc<RgbaImage>,
    params: ProcessParams,
    line_color: [u8; 4],
) -> Result<RenderedOutput, String> {
    // Spawn blocking because compositing is CPU-intensive
    tokio::task::spawn_blocking(move || {
        let hires = render::compose::render_hires(&source, &params);
        let lores = render::preview::downsize_for_viewport(&hires, &params, line_color);
        RenderedOutput {
            hires: Arc::new(hires),
            lores: Arc::new(lores),
        }
    })
    .await
    .map_err(|e| format!("task join error: {}", e))
}

/// Drive the save dialog for one job and write the file if confirmed
async fn run_export_job(job: ExportJob) -> JobOutcome {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Save panel")
        .set_file_name(&job.filename);
    if let Some(pictures) = dirs::picture_dir() {
        dialog = dialog.set_directory(pictures);
    }

    let Some(target) = dialog.save_file().await else {
        return JobOutcome::Cancelled;
    };

    match disk::save_jpeg(job.bitmap, target.path().to_path_buf()).await {
        Ok(()) => JobOutcome::Saved,
        Err(e) => JobOutcome::Failed(e.to_string()),
    }
}
