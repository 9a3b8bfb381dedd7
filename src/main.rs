use comet::{Result, Shell};

fn main() -> Result<()> {
    Shell::new().run()
}
