//! # PDF Bill of Quantities
//!
//! Renders a [`PlanEstimate`] to a PDF report using Typst.
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected by placeholder replacement before compilation
//! - User-supplied text (plan, room and owner names) is escaped
//! - Fonts come from `typst-assets`; nothing is read from disk
//!
//! ## Example
//!
//! ```rust,no_run
//! use boq_core::estimate::estimate;
//! use boq_core::pdf::render_estimate_pdf;
//! use boq_core::templates;
//!
//! let plan = templates::get("duplex_4bed", "bafoussam").unwrap();
//! let result = estimate(&plan).unwrap();
//! let pdf_bytes = render_estimate_pdf(&result, "Duplex", "Client Name").unwrap();
//! std::fs::write("duplex_boq.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::ConstructionStage;
use crate::document::PlanDocument;
use crate::errors::{CalcError, CalcResult};
use crate::estimate::{PlanEstimate, LABOR_RATIO};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// In-memory Typst world: one source file, bundled fonts, no file access.
struct PdfWorld {
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts: Vec<Font> = typst_assets::fonts()
            .flat_map(|data| Font::iter(Bytes::new(data)))
            .collect();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// Template
// ============================================================================

const BOQ_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2cm, bottom: 2cm, left: 1.8cm, right: 1.8cm),
  header: align(right)[
    #text(size: 8pt, fill: gray)[Bill of Quantities]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 8pt)[{{TITLE}}]],
      align(center)[#text(size: 8pt)[Page #counter(page).display()]],
      align(right)[#text(size: 8pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 10pt)
#set table(stroke: 0.5pt, inset: 6pt)

#align(center)[
  #block(width: 100%, fill: rgb("#eef2f5"), inset: 14pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[{{TITLE}}]
    #v(2pt)
    #text(size: 11pt)[Prepared for {{PREPARED_FOR}}]
  ]
]

#v(10pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 18pt,
  [
    *Building*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      inset: 3pt,
      [Type:], [{{HOUSE_TYPE}}],
      [Floors:], [{{FLOORS}}],
      [Rooms:], [{{ROOMS}}],
      [Floor area:], [{{FLOOR_AREA}} m²],
      [Built area:], [{{BUILT_AREA}} m²],
      [Wall area:], [{{WALL_AREA}} m²],
    )
  ],
  [
    *Specification*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      inset: 3pt,
      [Foundation:], [{{FOUNDATION}}],
      [Walls:], [{{WALLS}}],
      [Roofing:], [{{ROOFING}}],
      [Finishing:], [{{FINISHING}}],
      [Location:], [{{LOCATION}}],
      [Price index:], [{{MULTIPLIER}}],
    )
  ]
)

#v(10pt)

== Room Schedule

#table(
  columns: (auto, 1fr, 1fr, auto, auto, auto, auto),
  align: (left, left, left, right, right, right, right),
  table.header([*Floor*], [*Room*], [*Type*], [*L (m)*], [*W (m)*], [*H (m)*], [*Area (m²)*]),
{{ROOM_ROWS}}
)

{{STAGE_SECTIONS}}

#v(10pt)
#line(length: 100%, stroke: 0.5pt)

== Cost Summary

#table(
  columns: (1fr, auto, auto),
  align: (left, right, right),
  table.header([*Stage*], [*Days*], [*Cost ({{CURRENCY}})*]),
{{SUMMARY_ROWS}}
  [*Materials*], [], [*{{MATERIALS}}*],
  [Labor ({{LABOR_PCT}}%)], [], [{{LABOR}}],
  [*Total project cost*], [*{{DAYS}}*], [*{{TOTAL}}*],
)

#v(16pt)

#text(size: 8pt, fill: gray)[
  Quantities are rounded up to whole purchase units. Prices are indicative
  and should be confirmed with local suppliers before procurement.
]
"##;

// ============================================================================
// Rendering
// ============================================================================

/// Render an estimate to PDF bytes.
///
/// `title` and `prepared_for` are free text shown on the cover block.
pub fn render_estimate_pdf(estimate: &PlanEstimate, title: &str, prepared_for: &str) -> CalcResult<Vec<u8>> {
    let plan = &estimate.plan;

    let source = BOQ_TEMPLATE
        .replace("{{TITLE}}", &escape_typst(title))
        .replace("{{PREPARED_FOR}}", &escape_typst(prepared_for))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{HOUSE_TYPE}}", plan.house_type.display_name())
        .replace("{{FLOORS}}", &estimate.floor_count.to_string())
        .replace("{{ROOMS}}", &estimate.room_count.to_string())
        .replace("{{FLOOR_AREA}}", &format!("{:.2}", estimate.total_floor_area_m2))
        .replace("{{BUILT_AREA}}", &format!("{:.2}", estimate.total_built_area_m2))
        .replace("{{WALL_AREA}}", &format!("{:.2}", estimate.total_wall_area_m2))
        .replace("{{FOUNDATION}}", plan.foundation_type.display_name())
        .replace("{{WALLS}}", plan.wall_type.display_name())
        .replace("{{ROOFING}}", plan.roofing_type.display_name())
        .replace("{{FINISHING}}", plan.finishing_level.display_name())
        .replace("{{LOCATION}}", &escape_typst(&plan.location))
        .replace("{{MULTIPLIER}}", &format!("{:.2}", estimate.region_multiplier))
        .replace("{{ROOM_ROWS}}", &room_rows(estimate))
        .replace("{{STAGE_SECTIONS}}", &stage_sections(estimate))
        .replace("{{SUMMARY_ROWS}}", &summary_rows(estimate))
        .replace("{{CURRENCY}}", &escape_typst(&estimate.currency))
        .replace("{{MATERIALS}}", &format_money(estimate.total_materials_cost))
        .replace("{{LABOR_PCT}}", &format!("{:.0}", LABOR_RATIO * 100.0))
        .replace("{{LABOR}}", &format_money(estimate.labor_cost))
        .replace("{{DAYS}}", &estimate.total_duration_days.to_string())
        .replace("{{TOTAL}}", &format_money(estimate.total_project_cost));

    let bytes = compile_pdf(source)?;
    tracing::info!(title, bytes = bytes.len(), "BOQ PDF rendered");
    Ok(bytes)
}

/// Render a saved document. The document must carry a computed estimate.
pub fn render_document_pdf(doc: &PlanDocument) -> CalcResult<Vec<u8>> {
    let estimate = doc.estimate.as_ref().ok_or_else(|| {
        CalcError::invalid_input("estimate", "none", "Document has no estimate; recalculate before rendering")
    })?;
    render_estimate_pdf(estimate, &doc.meta.title, &doc.meta.owner_id)
}

fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);

    let document = typst::compile::<PagedDocument>(&world).output.map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed(format!("Typst compilation failed: {}", msgs.join("; ")))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::render_failed(format!("PDF export failed: {}", msgs.join("; ")))
    })
}

fn room_rows(estimate: &PlanEstimate) -> String {
    estimate
        .plan
        .floors
        .iter()
        .flat_map(|floor| {
            floor.rooms.iter().map(move |room| {
                format!(
                    "  [{}], [{}], [{}], [{:.2}], [{:.2}], [{:.2}], [{:.2}],",
                    escape_typst(&floor.name),
                    escape_typst(&room.name),
                    escape_typst(&room.room_type),
                    room.length_m,
                    room.width_m,
                    room.height_m,
                    room.floor_area().0,
                )
            })
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn stage_table(stage: &ConstructionStage, currency: &str) -> String {
    let rows = stage
        .items
        .iter()
        .map(|item| {
            format!(
                "  [{}], [{}], [{}], [{}], [{}],",
                escape_typst(item.name()),
                escape_typst(item.unit()),
                item.quantity(),
                format_money(item.unit_price()),
                format_money(item.total_price()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "== {}. {}\n\n#table(\n  columns: (1fr, auto, auto, auto, auto),\n  align: (left, left, right, right, right),\n  table.header([*Item*], [*Unit*], [*Qty*], [*Rate*], [*Amount ({})*]),\n{}\n  table.cell(colspan: 4)[*Stage total*], [*{}*],\n)\n",
        stage.order,
        escape_typst(&stage.name),
        escape_typst(currency),
        rows,
        format_money(stage.total_cost),
    )
}

fn stage_sections(estimate: &PlanEstimate) -> String {
    estimate
        .stages
        .iter()
        .map(|stage| stage_table(stage, &estimate.currency))
        .collect::<Vec<_>>()
        .join("\n")
}

fn summary_rows(estimate: &PlanEstimate) -> String {
    estimate
        .stages
        .iter()
        .map(|stage| {
            format!(
                "  [{}], [{}], [{}],",
                escape_typst(&stage.name),
                stage.duration_days,
                format_money(stage.total_cost)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Whole currency units with thousands separators: `1234567.4` → `1,234,567`
fn format_money(amount: f64) -> String {
    let rounded = format!("{:.0}", amount.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, c) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0.0 && rounded != "0" {
        grouped.insert(0, '-');
    }
    grouped
}

/// Escape characters that Typst markup treats specially
fn escape_typst(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '*' | '_' | '#' | '$' | '@' | '<' | '>' | '\\' | '`' | '[' | ']' | '=' | '-' | '+' | '/' | '~') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
