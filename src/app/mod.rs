mod painter;
mod toolbar;

use std::path::{Path, PathBuf};

use defect_annotate::config::SurfaceSettings;
use defect_annotate::geometry::{ScreenRect, SurfaceGeometry};
use defect_annotate::render::Renderer;
use defect_annotate::shape::ShapeList;
use defect_annotate::surface::{AnnotationSurface, PointerInput, SurfaceEvent, SurfaceMessage};
use eframe::egui;
use image::DynamicImage;

// ── App ─────────────────────────────────────────────────────────────────────

pub struct DefectAnnotateApp {
    image_path: Option<PathBuf>,
    texture: Option<egui::TextureHandle>,
    raw_image: Option<DynamicImage>,
    image_size: (f32, f32),

    /// Shapes belong to the page, not to the surface.
    shapes: ShapeList,
    surface: AnnotationSurface,
    renderer: Renderer,
    settings: SurfaceSettings,

    zoom_percent: f32,
    zoom_view_open: bool,
}

impl DefectAnnotateApp {
    pub fn new(image_path: Option<PathBuf>, settings: SurfaceSettings) -> Self {
        let mut app = Self {
            image_path: None,
            texture: None,
            raw_image: None,
            image_size: (0.0, 0.0),
            shapes: ShapeList::new(),
            surface: AnnotationSurface::new(&settings),
            renderer: Renderer::new(&settings),
            zoom_percent: settings.default_zoom_percent,
            settings,
            zoom_view_open: false,
        };
        if let Some(path) = image_path {
            app.open_image(&path);
        }
        app
    }

    /// Switches to a new image. Annotations belong to one image, so they go.
    fn open_image(&mut self, path: &Path) {
        match image::open(path) {
            Ok(img) => {
                log::info!("Opened {} ({}x{})", path.display(), img.width(), img.height());
                self.image_size = (img.width() as f32, img.height() as f32);
                self.raw_image = Some(img);
                self.image_path = Some(path.to_path_buf());
                self.texture = None;
                self.surface.cancel();
                self.send(SurfaceMessage::ClearAll);
            }
            Err(e) => log::error!("Failed to open {}: {}", path.display(), e),
        }
    }

    fn pick_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp"])
            .pick_file()
        {
            self.open_image(&path);
        }
    }

    fn send(&mut self, msg: SurfaceMessage) {
        if let Some(SurfaceEvent::ZoomRequested) = self.surface.update(msg, &mut self.shapes) {
            self.zoom_view_open = self.texture.is_some();
        }
    }

    fn set_zoom(&mut self, percent: f32) {
        self.zoom_percent = self.settings.clamp_zoom(percent);
    }

    /// Logs the annotations; there is nowhere to store them.
    fn submit(&self) {
        match self.shapes.to_json() {
            Ok(json) => log::info!("Submitted {} annotations: {}", self.shapes.len(), json),
            Err(e) => log::error!("Failed to serialize annotations: {}", e),
        }
    }

    fn ensure_texture(&mut self, ctx: &egui::Context) {
        if self.texture.is_some() {
            return;
        }
        if let Some(ref img) = self.raw_image {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = rgba.as_flat_samples();
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
            self.texture = Some(ctx.load_texture("image", color_image, egui::TextureOptions::LINEAR));
        }
    }

    fn canvas(&mut self, ui: &mut egui::Ui) {
        let Some(texture) = self.texture.clone() else {
            ui.centered_and_justified(|ui| {
                ui.label("Open an image to start annotating");
            });
            return;
        };
        let fit_width = ui.available_width();

        egui::ScrollArea::both().show(ui, |ui| {
            let layout = SurfaceGeometry::layout((0.0, 0.0), fit_width, self.image_size, self.zoom_percent);
            let size = egui::vec2(layout.bounds.width, layout.bounds.height);
            let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());

            // Where the image really landed this frame, including scroll offset.
            let rect = response.rect;
            let geometry = SurfaceGeometry::new(
                ScreenRect::new(rect.left(), rect.top(), rect.width(), rect.height()),
                self.image_size.0,
                self.image_size.1,
            );

            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );

            self.handle_pointer(ui, &response, geometry);

            let list = self.renderer.render(self.shapes.as_slice(), self.surface.in_progress().as_ref());
            painter::paint_display_list(&painter, &geometry, &list);
        });
    }

    fn handle_pointer(&mut self, ui: &egui::Ui, response: &egui::Response, geometry: SurfaceGeometry) {
        let (pressed, released, pos, shift) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.latest_pos(),
                i.modifiers.shift,
            )
        });
        let Some(pos) = pos else {
            return;
        };
        let input = PointerInput::new((pos.x, pos.y), geometry).with_shift(shift);

        if pressed && response.contains_pointer() {
            self.send(SurfaceMessage::PointerDown(input));
        }
        if self.surface.is_drawing() {
            self.send(SurfaceMessage::PointerMove(input));
        }
        if released {
            self.send(SurfaceMessage::PointerUp(input));
        }
        if response.double_clicked() {
            self.send(SurfaceMessage::DoubleClick);
        }
    }

    fn zoom_view(&mut self, ctx: &egui::Context) {
        let Some(ref texture) = self.texture else {
            return;
        };
        let title = self
            .image_path
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Zoomed image")
            .to_string();
        egui::Window::new(title)
            .open(&mut self.zoom_view_open)
            .collapsible(false)
            .resizable(true)
            .default_size(ctx.screen_rect().size() * 0.85)
            .show(ctx, |ui| {
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::from_handle(texture)).shrink_to_fit(),
                );
            });
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for DefectAnnotateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_texture(ctx);

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if self.zoom_view_open {
                self.zoom_view_open = false;
            } else {
                self.send(SurfaceMessage::Cancel);
            }
        }

        egui::TopBottomPanel::top("file_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open image…").clicked() {
                    self.pick_image();
                }
                if let Some(ref path) = self.image_path {
                    ui.label(path.display().to_string());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak("Shift+click the image for a full-size view");
                });
            });
        });

        egui::SidePanel::right("annotation_tools")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| toolbar::show(self, ui));

        egui::CentralPanel::default().show(ctx, |ui| self.canvas(ui));

        self.zoom_view(ctx);
    }
}
