//! Synthetic run dumps shared by the integration tests.

#![allow(dead_code)]

use docsift::{BoundingBox, Document, TextRun};

/// Lays out text runs top to bottom, one line per call.
pub struct DocWriter {
    id: String,
    runs: Vec<TextRun>,
    page: u32,
    y: f32,
}

impl DocWriter {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            runs: Vec::new(),
            page: 1,
            y: 72.0,
        }
    }

    pub fn line(&mut self, text: &str, size: f32, bold: bool, space_before: f32) -> &mut Self {
        self.y += space_before;
        let width = text.chars().count() as f32 * size * 0.5;
        let mut run = TextRun::new(
            text,
            self.page,
            size,
            BoundingBox::new(72.0, self.y, 72.0 + width, self.y + size),
        );
        if bold {
            run = run.bold();
        }
        self.runs.push(run);
        self.y += size + 2.0;
        self
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.line(text, 24.0, true, 0.0)
    }

    pub fn h1(&mut self, text: &str) -> &mut Self {
        self.line(text, 16.0, true, 20.0)
    }

    pub fn h2(&mut self, text: &str) -> &mut Self {
        self.line(text, 13.0, true, 12.0)
    }

    pub fn para(&mut self, text: &str) -> &mut Self {
        self.line(text, 10.0, false, 0.0)
    }

    pub fn filler(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            self.para("plain body text that carries no particular meaning");
        }
        self
    }

    pub fn next_page(&mut self) -> &mut Self {
        self.page += 1;
        self.y = 72.0;
        self
    }

    pub fn build(&self) -> Document {
        Document::new(self.id.as_str())
            .with_runs(self.runs.clone())
            .with_page_count(self.page)
    }
}

/// A travel guide whose first section matches a trip-planning query.
pub fn travel_guide() -> Document {
    DocWriter::new("cities.pdf")
        .title("South of France Guide")
        .h1("Budget-Friendly Activities")
        .para("Explore the markets and beaches with friends on a trip.")
        .para("Picnics in the park are cheap and fun.")
        .para("Many museums offer free entry on Sundays.")
        .h1("History")
        .para("The region was settled in antiquity.")
        .para("Roman ruins remain in several towns.")
        .next_page()
        .h1("Cuisine")
        .para("Bouillabaisse is a fish stew from Marseille.")
        .para("Local markets sell olives and cheese.")
        .build()
}

/// A business handbook with nothing about travel.
pub fn tax_handbook() -> Document {
    DocWriter::new("tax.pdf")
        .title("Business Handbook")
        .h1("Corporate Tax Policy")
        .para("Companies must file returns annually.")
        .para("Late filings incur penalties.")
        .build()
}

/// A scanned document without a text layer.
pub fn image_only(id: &str) -> Document {
    Document::new(id).with_page_count(3)
}
