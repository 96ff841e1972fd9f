use std::process;

fn main() {
    env_logger::init();
    if let Err(err) = jot::entry() {
        eprintln!("{err}");
        process::exit(1);
    }
}
