// PDF output through printpdf's built-in Helvetica faces.

use super::RenderBackend;
use crate::barcode;
use crate::config::{SheetConfig, MM_PER_INCH};
use crate::error::{LabelError, Result};
use crate::ops::{Color, Font};
use ::image::DynamicImage;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef,
    Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Point, Polygon, Px, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Outline thickness of slot borders, in points.
const BORDER_THICKNESS: f32 = 0.5;

/// Writes a multi-page PDF to `output` when finalized.
pub struct PdfBackend {
    doc: Option<PdfDocumentReference>,
    layer: PdfLayerReference,
    font_regular: IndirectFontRef,
    font_bold: IndirectFontRef,
    page_width: f32,
    page_height: f32,
    pages: usize,
    output: PathBuf,
}

impl PdfBackend {
    /// Open a document with one empty page sized per `config`.
    pub fn create(title: &str, config: &SheetConfig, output: impl Into<PathBuf>) -> Result<Self> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            Mm(config.page_width),
            Mm(config.page_height),
            "Page 1",
        );
        let layer = doc.get_page(page1).get_layer(layer1);

        let font_regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| LabelError::Backend(e.to_string()))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| LabelError::Backend(e.to_string()))?;

        Ok(Self {
            doc: Some(doc),
            layer,
            font_regular,
            font_bold,
            page_width: config.page_width,
            page_height: config.page_height,
            pages: 1,
            output: output.into(),
        })
    }

    /// Pages in the document, including the initial one.
    pub fn pages(&self) -> usize {
        self.pages
    }

    fn document(&self) -> Result<&PdfDocumentReference> {
        self.doc
            .as_ref()
            .ok_or_else(|| LabelError::Backend("document already finalized".to_string()))
    }
}

fn pdf_color(color: Color) -> printpdf::Color {
    printpdf::Color::Rgb(Rgb::new(color.r, color.g, color.b, None))
}

fn rect_points(x: f32, y: f32, width: f32, height: f32) -> Vec<(Point, bool)> {
    vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y + height)), false),
        (Point::new(Mm(x), Mm(y + height)), false),
    ]
}

impl RenderBackend for PdfBackend {
    fn draw_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Option<Color>,
    ) -> Result<()> {
        self.document()?;
        let points = rect_points(x, y, width, height);
        match fill {
            Some(color) => {
                self.layer.set_fill_color(pdf_color(color));
                self.layer.add_polygon(Polygon {
                    rings: vec![points],
                    mode: PaintMode::Fill,
                    winding_order: WindingOrder::NonZero,
                });
            }
            None => {
                self.layer.set_outline_color(pdf_color(Color::BLACK));
                self.layer.set_outline_thickness(BORDER_THICKNESS);
                self.layer.add_line(Line {
                    points,
                    is_closed: true,
                });
            }
        }
        Ok(())
    }

    fn draw_text_line(
        &mut self,
        x: f32,
        y: f32,
        text: &str,
        font: Font,
        size: f32,
        color: Color,
    ) -> Result<()> {
        self.document()?;
        let face = match font {
            Font::Regular => &self.font_regular,
            Font::Bold => &self.font_bold,
        };
        self.layer.set_fill_color(pdf_color(color));
        self.layer.use_text(text, size, Mm(x), Mm(y), face);
        Ok(())
    }

    fn draw_barcode(
        &mut self,
        x: f32,
        y: f32,
        payload: &str,
        height: f32,
        width: Option<f32>,
    ) -> Result<()> {
        self.document()?;
        let modules = barcode::encode(payload)?;
        let width = width.unwrap_or(modules.len() as f32 * barcode::MODULE_WIDTH_MM);
        if width <= 0.0 || height <= 0.0 {
            tracing::warn!(payload, width, height, "barcode has no room on the label, skipped");
            return Ok(());
        }

        let bars = barcode::render_modules(&modules, barcode::raster_height_px(height));
        let rgb_image = DynamicImage::ImageLuma8(bars).to_rgb8();
        let (width_px, height_px) = rgb_image.dimensions();

        let image = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: rgb_image.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI fixes the horizontal size; the vertical scale stretches bars to `height`.
        let dpi = width_px as f32 / (width / MM_PER_INCH);
        let natural_height = height_px as f32 / dpi * MM_PER_INCH;

        image.add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(y)),
                dpi: Some(dpi),
                scale_y: Some(height / natural_height),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn page_break(&mut self) -> Result<()> {
        let doc = self.document()?;
        let (page, layer) = doc.add_page(
            Mm(self.page_width),
            Mm(self.page_height),
            format!("Page {}", self.pages + 1),
        );
        self.layer = doc.get_page(page).get_layer(layer);
        self.pages += 1;
        tracing::debug!(page = self.pages, "added PDF page");
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let doc = self
            .doc
            .take()
            .ok_or_else(|| LabelError::Backend("document already finalized".to_string()))?;

        let file = File::create(&self.output)?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)
            .map_err(|e| LabelError::Backend(e.to_string()))?;
        tracing::info!(path = %self.output.display(), pages = self.pages, "saved PDF");
        Ok(())
    }
}
