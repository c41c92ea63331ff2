use tpdash::error::AppResult;

fn main() -> AppResult<()> {
    tpdash::entry::run()
}
