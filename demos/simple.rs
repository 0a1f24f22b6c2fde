use std::sync::{Arc, Mutex};

use automocker::*;

// Define regular traits and a type depending on them

trait Logger {
    fn log(&self, content: &str);
}

trait Clock {
    fn now(&self) -> u64;
}

struct DateLogger {
    logger: Arc<dyn Logger>,
    clock: Arc<dyn Clock>,
}

impl DateLogger {
    fn new(logger: Arc<dyn Logger>, clock: Arc<dyn Clock>) -> Self {
        Self { logger, clock }
    }

    fn log_date(&self) {
        self.logger
            .log(&format!("{}s since epoch", self.clock.now()));
    }
}

// Define mocks recording calls and returning configured values

#[derive(Default)]
struct MockLogger {
    lines: Mutex<Vec<String>>,
}

impl Logger for MockLogger {
    fn log(&self, content: &str) {
        self.lines.lock().unwrap().push(content.to_string());
    }
}

#[derive(Default)]
struct MockClock {
    now: Mutex<u64>,
}

impl Clock for MockClock {
    fn now(&self) -> u64 {
        *self.now.lock().unwrap()
    }
}

mock_interface!(dyn Logger => MockLogger, dyn Clock => MockClock);
constructors!(DateLogger, new);

fn main() -> Result<(), AutoMockError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let mut mocker = AutoMocker::new();
    mocker.activate::<dyn Clock, _>(|clock| *clock.now.lock().unwrap() = 1_700_000_000);

    let date_logger: DateLogger = mocker.create()?;
    date_logger.log_date();

    let logger = mocker.mock::<dyn Logger>()?;
    for line in logger.lines.lock().unwrap().iter() {
        println!("logged: {}", line);
    }

    Ok(())
}
