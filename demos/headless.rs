//! Headless page-flip simulation.
//!
//! Builds a book, opens it to a page, and steps a 60 Hz loop while logging
//! the displayed page and the hinge angles. By default the loop runs as fast
//! as it can on fixed steps; `--realtime` paces it to the wall clock and
//! feeds measured frame times instead.
//!
//! ```sh
//! RUST_LOG=info cargo run --example headless -- 6
//! RUST_LOG=info cargo run --example headless -- 6 --realtime
//! ```

use std::time::Duration;

use flipbook::book::{Book, BookConfig, PageSpec};
use flipbook::resources::TexturePaths;
use flipbook::utils::Timer;

const PICTURES: [&str; 12] = [
    "DSC00680", "DSC00933", "DSC00966", "DSC00983", "DSC01011", "DSC01040", "DSC01064",
    "DSC01071", "DSC01103", "DSC01145", "DSC01420", "DSC01461",
];

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let realtime = args.iter().any(|arg| arg == "--realtime");
    let target: usize = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .map(|arg| arg.parse::<usize>())
        .transpose()?
        .unwrap_or(4);

    let config = BookConfig::default();
    let mut textures = TexturePaths::new(&config.textures.dir, &config.textures.extension);
    let pages = PageSpec::from_pictures(&PICTURES, "book-cover", "book-back");
    let mut book = Book::new(config, pages)?;

    for id in book.texture_manifest() {
        textures.mark_loaded(&id);
    }
    let assembled = book.assemble_ready_pages(&textures);
    log::info!("{assembled} pages assembled");

    book.request_page(target.min(book.page_count()))?;

    let step = Duration::from_secs_f64(1.0 / 60.0);
    let mut timer = if realtime {
        Timer::realtime()
    } else {
        Timer::fixed(step)
    };

    for frame_index in 0..360_u32 {
        if realtime {
            std::thread::sleep(step);
        }
        book.update(timer.tick());

        if frame_index % 30 == 0 {
            let hinges: Vec<String> = book
                .pages()
                .iter()
                .map(|p| format!("{:+.2}", p.group_rotation()))
                .collect();
            log::info!(
                "frame {frame_index} t={:.2}s displayed={} hinges=[{}]",
                timer.elapsed.as_secs_f64(),
                book.displayed_page(),
                hinges.join(" ")
            );
        }
    }

    Ok(())
}
