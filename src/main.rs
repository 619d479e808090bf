mod app;
mod db;
mod report;
mod utils;

use app::App;

fn main() {
    let app = App::new();
    let code = app.run();
    if code != 0 {
        std::process::exit(code);
    }
}
