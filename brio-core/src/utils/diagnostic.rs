use std::path::PathBuf;

use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label, LabelStyle, Severity};
use codespan_reporting::files::SimpleFiles;
use termcolor::Buffer;

use super::src_span::SrcSpan;

pub enum Level {
    Warning,
    Error,
}

// A span within the source to underline, with an optional note next to it.
pub struct Highlight {
    pub text: Option<String>,
    pub span: SrcSpan,
}

impl Highlight {
    fn to_label(&self, file_id: usize, style: LabelStyle) -> Label<usize> {
        let label = Label::new(
            style,
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            Some(text) => label.with_message(text.clone()),
            None => label,
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub highlight: Highlight,
    pub context: Vec<Highlight>,
}

pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>,
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) {
        use std::io::Write;

        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("write diagnostic text");
        }
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) {
        let mut files = SimpleFiles::new();
        let file_id = files.add(
            location.path.to_str().unwrap_or_default(),
            location.src,
        );

        let mut labels = vec![location.highlight.to_label(file_id, LabelStyle::Primary)];
        labels.extend(
            location.context.iter()
                .map(|highlight| highlight.to_label(file_id, LabelStyle::Secondary))
        );

        let severity = match self.level {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        };

        let diagnostic = CodespanDiagnostic::new(severity)
            .with_message(&self.title)
            .with_labels(labels);

        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(buf, &config, &files, &diagnostic)
            .expect("write diagnostic");
    }

    fn write_title(&self, buf: &mut Buffer) {
        use std::io::Write;
        use termcolor::{Color, ColorSpec, WriteColor};

        let (kind, colour) = match self.level {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))
            .expect("write diagnostic title");
        write!(buf, "{kind}").expect("write diagnostic title");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write diagnostic title");
        write!(buf, ": {}\n\n", self.title).expect("write diagnostic title");

        buf.set_color(&ColorSpec::new())
            .expect("write diagnostic title");
    }
}
