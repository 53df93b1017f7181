use std::{
    cell::RefCell,
    io,
    path::Path,
    time::{Duration, SystemTime},
};

use cablegrid::{FileProvider, Reloader};

/// In-memory stand-in for the file system so reload transitions can be
/// driven without touching disk.
struct FakeFiles {
    state: RefCell<Option<(SystemTime, String)>>,
}

impl FakeFiles {
    fn missing() -> Self {
        Self {
            state: RefCell::new(None),
        }
    }

    fn with(content: &str) -> Self {
        Self {
            state: RefCell::new(Some((SystemTime::UNIX_EPOCH, content.to_string()))),
        }
    }

    fn touch(&self) {
        let mut state = self.state.borrow_mut();
        if let Some((mtime, _)) = state.as_mut() {
            *mtime += Duration::from_secs(1);
        }
    }

    fn write(&self, content: &str) {
        let mut state = self.state.borrow_mut();
        let next_mtime = state
            .as_ref()
            .map(|(m, _)| *m + Duration::from_secs(1))
            .unwrap_or(SystemTime::UNIX_EPOCH);
        *state = Some((next_mtime, content.to_string()));
    }
}

impl FileProvider for FakeFiles {
    fn exists(&self, _path: &Path) -> bool {
        self.state.borrow().is_some()
    }

    fn modified(&self, _path: &Path) -> Option<SystemTime> {
        self.state.borrow().as_ref().map(|(m, _)| *m)
    }

    fn read_to_string(&self, _path: &Path) -> io::Result<String> {
        self.state
            .borrow()
            .as_ref()
            .map(|(_, c)| c.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}

const ONE_SET: &str = r#"polyline_set["a", (1,2,3)] = [ [ (0,0), (1,1) ] ]"#;
const TWO_SETS: &str = r#"
    polyline_set["a", (1,2,3)] = [ [ (0,0), (1,1) ] ]
    polyline_set["b", (4,5,6)] = [ [ (2,2), (3,3) ] ]
"#;

#[test]
fn initial_load_parses_once() {
    let files = FakeFiles::with(ONE_SET);
    let reloader = Reloader::load("input.txt", &files);
    assert_eq!(reloader.sets().len(), 1);
}

#[test]
fn missing_file_loads_empty_and_stays_quiet() {
    let files = FakeFiles::missing();
    let mut reloader = Reloader::load("input.txt", &files);
    assert!(reloader.sets().is_empty());
    assert!(!reloader.poll(&files));
    assert!(reloader.sets().is_empty());
}

#[test]
fn unchanged_timestamp_never_reparses() {
    let files = FakeFiles::with(ONE_SET);
    let mut reloader = Reloader::load("input.txt", &files);
    for _ in 0..5 {
        assert!(!reloader.poll(&files));
    }
}

#[test]
fn touch_without_content_change_reparses_exactly_once() {
    let files = FakeFiles::with(ONE_SET);
    let mut reloader = Reloader::load("input.txt", &files);
    let before = reloader.sets().to_vec();

    files.touch();
    assert!(reloader.poll(&files));
    assert_eq!(reloader.sets(), before.as_slice());

    assert!(!reloader.poll(&files));
}

#[test]
fn content_change_replaces_the_whole_generation() {
    let files = FakeFiles::with(ONE_SET);
    let mut reloader = Reloader::load("input.txt", &files);
    assert_eq!(reloader.sets().len(), 1);

    files.write(TWO_SETS);
    assert!(reloader.poll(&files));
    assert_eq!(reloader.sets().len(), 2);
}

#[test]
fn file_appearing_after_startup_is_picked_up() {
    let files = FakeFiles::missing();
    let mut reloader = Reloader::load("input.txt", &files);
    assert!(reloader.sets().is_empty());

    files.write(ONE_SET);
    assert!(reloader.poll(&files));
    assert_eq!(reloader.sets().len(), 1);
}

#[test]
fn parse_trouble_degrades_to_fewer_sets_not_an_error() {
    let files = FakeFiles::with(ONE_SET);
    let mut reloader = Reloader::load("input.txt", &files);

    files.write("polyline_set[\"broken\" = [ [ (0,0) ] ]");
    assert!(reloader.poll(&files));
    assert!(reloader.sets().is_empty());
}
