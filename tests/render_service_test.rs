//! Tests for RenderService with stubbed drawtree and converter

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use stemma::application::services::RenderService;
use stemma::application::ApplicationError;
use stemma::config::Settings;
use stemma::domain::{NativeTool, TreeText};
use stemma::infrastructure::traits::{NativeTools, PostscriptConverter, RealFileSystem};
use stemma::infrastructure::{InfraError, InfraResult};
use stemma::util::testing;

const POSTSCRIPT: &str = "%!PS-Adobe-2.0\n0 0 moveto 100 100 lineto stroke\nshowpage\n";
const SVG: &str = "<svg xmlns=\"http://www.w3.org/2000/svg\"><path d=\"M0 0L100 100\"/></svg>";

/// drawtree stub: writes `POSTSCRIPT` to the plot file.
struct StubDrawtree {
    succeed: bool,
    fonts: Mutex<Vec<PathBuf>>,
}

impl StubDrawtree {
    fn new(succeed: bool) -> Arc<Self> {
        Arc::new(Self {
            succeed,
            fonts: Mutex::new(Vec::new()),
        })
    }
}

impl NativeTools for StubDrawtree {
    fn fitch(&self, _input: &Path, _output: &Path, _tree: &Path) -> InfraResult<bool> {
        unreachable!("rendering never infers")
    }

    fn drawtree(&self, tree: &Path, font: &Path, output: &Path) -> InfraResult<bool> {
        assert!(tree.exists(), "tree file must be written before the call");
        self.fonts.lock().unwrap().push(font.to_path_buf());
        if self.succeed {
            std::fs::write(output, POSTSCRIPT).unwrap();
        }
        Ok(self.succeed)
    }
}

/// Converter that records its inputs.
struct RecordingConverter {
    result: Result<String, i32>,
    inputs: Mutex<Vec<String>>,
}

impl RecordingConverter {
    fn returning(svg: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(svg.to_string()),
            inputs: Mutex::new(Vec::new()),
        })
    }

    fn failing(exit_code: i32) -> Arc<Self> {
        Arc::new(Self {
            result: Err(exit_code),
            inputs: Mutex::new(Vec::new()),
        })
    }

    fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl PostscriptConverter for RecordingConverter {
    fn to_svg(&self, postscript: &str) -> InfraResult<String> {
        self.inputs.lock().unwrap().push(postscript.to_string());
        match &self.result {
            Ok(svg) => Ok(svg.clone()),
            Err(code) => Err(InfraError::Converter {
                message: "gs: unrecoverable error".into(),
                exit_code: Some(*code),
            }),
        }
    }
}

struct Fixture {
    _temp: TempDir,
    scratch: PathBuf,
    font: PathBuf,
}

impl Fixture {
    /// Scratch dir plus a font file kept outside of it.
    fn new() -> Self {
        testing::init_test_setup();
        let temp = TempDir::new().unwrap();
        let scratch = temp.path().join("scratch");
        let font = temp.path().join("font1");
        std::fs::write(&font, "font data").unwrap();
        Self {
            _temp: temp,
            scratch,
            font,
        }
    }

    fn service(
        &self,
        tools: Arc<StubDrawtree>,
        converter: Arc<RecordingConverter>,
    ) -> RenderService {
        let settings = Settings {
            scratch_dir: self.scratch.clone(),
            font_file: Some(self.font.clone()),
            ..Settings::default()
        };
        RenderService::new(
            Arc::new(RealFileSystem),
            tools,
            converter,
            Arc::new(settings),
        )
    }

    fn scratch_entries(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.scratch)
            .map(|rd| rd.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }
}

fn tree() -> TreeText {
    TreeText::new("(aaa,(aab,aac));").unwrap()
}

// ============================================================
// render() tests
// ============================================================

#[test]
fn given_succeeding_tools_when_rendering_then_returns_svg_and_postscript() {
    // Arrange
    let fixture = Fixture::new();
    let converter = RecordingConverter::returning(SVG);
    let service = fixture.service(StubDrawtree::new(true), converter.clone());

    // Act
    let rendered = service.render(&tree()).unwrap();

    // Assert
    assert_eq!(rendered.svg, SVG);
    assert_eq!(rendered.postscript, POSTSCRIPT);
}

#[test]
fn given_succeeding_tools_when_rendering_then_converter_called_once_with_postscript() {
    let fixture = Fixture::new();
    let converter = RecordingConverter::returning(SVG);
    let service = fixture.service(StubDrawtree::new(true), converter.clone());

    service.render(&tree()).unwrap();

    assert_eq!(converter.inputs(), vec![POSTSCRIPT.to_string()]);
}

#[test]
fn given_font_file_setting_when_rendering_then_passes_it_to_drawtree() {
    let fixture = Fixture::new();
    let tools = StubDrawtree::new(true);
    let service = fixture.service(tools.clone(), RecordingConverter::returning(SVG));

    service.render(&tree()).unwrap();

    assert_eq!(*tools.fonts.lock().unwrap(), vec![fixture.font.clone()]);
}

#[test]
fn given_succeeding_tools_when_rendering_then_scratch_dir_is_left_empty() {
    let fixture = Fixture::new();
    let service = fixture.service(StubDrawtree::new(true), RecordingConverter::returning(SVG));

    service.render(&tree()).unwrap();

    assert!(fixture.scratch.is_dir());
    assert!(fixture.scratch_entries().is_empty());
}

#[test]
fn given_failing_drawtree_when_rendering_then_tool_failed_and_converter_not_called() {
    // Arrange
    let fixture = Fixture::new();
    let converter = RecordingConverter::returning(SVG);
    let service = fixture.service(StubDrawtree::new(false), converter.clone());

    // Act
    let result = service.render(&tree());

    // Assert
    assert!(matches!(
        result,
        Err(ApplicationError::ToolFailed {
            tool: NativeTool::Drawtree
        })
    ));
    assert!(converter.inputs().is_empty());
    assert!(fixture.scratch_entries().is_empty());
}

#[test]
fn given_failing_converter_when_rendering_then_conversion_error_and_no_files_left() {
    let fixture = Fixture::new();
    let service = fixture.service(StubDrawtree::new(true), RecordingConverter::failing(1));

    let result = service.render(&tree());

    assert!(matches!(result, Err(ApplicationError::Conversion { .. })));
    assert!(fixture.scratch_entries().is_empty());
}

#[test]
fn given_missing_font_when_rendering_then_missing_font_without_calling_drawtree() {
    // Arrange
    let fixture = Fixture::new();
    std::fs::remove_file(&fixture.font).unwrap();
    let tools = StubDrawtree::new(true);
    let service = fixture.service(tools.clone(), RecordingConverter::returning(SVG));

    // Act
    let result = service.render(&tree());

    // Assert
    match result {
        Err(ApplicationError::MissingFont(path)) => assert_eq!(path, fixture.font),
        other => panic!("expected MissingFont, got {other:?}"),
    }
    assert!(tools.fonts.lock().unwrap().is_empty());
}

// ============================================================
// render_best_effort() tests
// ============================================================

#[test]
fn given_succeeding_tools_when_rendering_best_effort_then_returns_pair() {
    let fixture = Fixture::new();
    let service = fixture.service(StubDrawtree::new(true), RecordingConverter::returning(SVG));

    let (svg, postscript) = service.render_best_effort("(aaa,aab);");

    assert_eq!(svg, SVG);
    assert_eq!(postscript, POSTSCRIPT);
}

#[test]
fn given_failing_drawtree_when_rendering_best_effort_then_returns_empty_pair() {
    let fixture = Fixture::new();
    let service = fixture.service(StubDrawtree::new(false), RecordingConverter::returning(SVG));

    let (svg, postscript) = service.render_best_effort("(aaa,aab);");

    assert_eq!(svg, "");
    assert_eq!(postscript, "");
    assert!(fixture.scratch_entries().is_empty());
}

#[test]
fn given_blank_tree_when_rendering_best_effort_then_returns_empty_pair() {
    let fixture = Fixture::new();
    let tools = StubDrawtree::new(true);
    let service = fixture.service(tools.clone(), RecordingConverter::returning(SVG));

    let result = service.render_best_effort("  \n");

    assert_eq!(result, (String::new(), String::new()));
    assert!(tools.fonts.lock().unwrap().is_empty());
}
