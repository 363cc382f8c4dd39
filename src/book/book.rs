use std::sync::Arc;
use std::time::Duration;

use crate::book::animator::{PagePose, animate_page};
use crate::book::config::BookConfig;
use crate::book::interaction::{Cursor, InteractionState, PointerEvent};
use crate::book::page::{Page, PagePlacement, PageSpec, PageTextures};
use crate::book::progression::PageProgression;
use crate::book::weights::create_page_geometry;
use crate::errors::{FlipbookError, Result};
use crate::resources::{Geometry, TextureResolver};

/// An interactive book.
///
/// The book owns its pages, the page geometry they share and the progression
/// state. It has no clock of its own: the caller drives the timer domain
/// with [`Book::advance_timers`] and the frame domain with
/// [`Book::tick_frame`], or both at once with [`Book::update`].
///
/// ```rust,ignore
/// let mut book = Book::new(BookConfig::default(), pages)?;
/// book.assemble_ready_pages(&textures);
/// book.request_page(3)?;
/// loop {
///     book.update(timer.delta);
///     renderer.draw(book.pages());
/// }
/// ```
#[derive(Debug)]
pub struct Book {
    config: BookConfig,
    geometry: Arc<Geometry>,
    pages: Vec<Page>,
    progression: PageProgression,
    interaction: InteractionState,
}

impl Book {
    pub fn new(config: BookConfig, specs: Vec<PageSpec>) -> Result<Self> {
        config.validate()?;
        if specs.is_empty() {
            return Err(FlipbookError::InvalidConfig(
                "a book needs at least one page".to_string(),
            ));
        }

        let geometry = Arc::new(create_page_geometry(&config.page));
        let pages = specs
            .into_iter()
            .enumerate()
            .map(|(number, spec)| Page::new(number, spec))
            .collect::<Vec<_>>();
        let progression = PageProgression::new(0, config.progression.clone());

        log::info!(
            "Book created: {} pages, {} segments per page",
            pages.len(),
            config.page.segments
        );

        Ok(Self {
            config,
            geometry,
            pages,
            progression,
            interaction: InteractionState::default(),
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// The page geometry shared by every page mesh.
    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    #[inline]
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    #[inline]
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    #[inline]
    #[must_use]
    pub fn page(&self, number: usize) -> Option<&Page> {
        self.pages.get(number)
    }

    #[inline]
    #[must_use]
    pub fn progression(&self) -> &PageProgression {
        &self.progression
    }

    #[inline]
    #[must_use]
    pub fn requested_page(&self) -> usize {
        self.progression.requested()
    }

    #[inline]
    #[must_use]
    pub fn displayed_page(&self) -> usize {
        self.progression.displayed()
    }

    /// Pose of page `number` for the currently displayed page.
    #[must_use]
    pub fn pose_of(&self, number: usize) -> PagePose {
        PagePose::for_page(number, self.displayed_page(), self.page_count())
    }

    /// Every texture identifier the book needs, without duplicates, in
    /// page order followed by the shared roughness map.
    #[must_use]
    pub fn texture_manifest(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.pages.len() * 2 + 1);
        let sides = self
            .pages
            .iter()
            .flat_map(|p| [&p.spec().front, &p.spec().back]);
        for id in sides.chain(std::iter::once(&self.config.textures.roughness_map)) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// Assembles every page whose textures the resolver can provide.
    ///
    /// Pages whose textures are still missing stay unassembled and are
    /// skipped by the animation until a later call succeeds. Returns the
    /// number of pages assembled by this call.
    pub fn assemble_ready_pages(&mut self, resolver: &impl TextureResolver) -> usize {
        let page_count = self.pages.len();
        let roughness_map = resolver.resolve(&self.config.textures.roughness_map);
        let mut assembled = 0;

        for page in self.pages.iter_mut().filter(|p| !p.is_assembled()) {
            let placement = PagePlacement {
                number: page.number(),
                page_count,
            };
            if placement.uses_roughness_map() && roughness_map.is_none() {
                log::debug!("Page {} waiting for roughness map", page.number());
                continue;
            }
            let (Some(front), Some(back)) = (
                resolver.resolve(&page.spec().front),
                resolver.resolve(&page.spec().back),
            ) else {
                log::debug!("Page {} waiting for textures", page.number());
                continue;
            };

            let textures = PageTextures {
                front,
                back,
                roughness_map: roughness_map.clone(),
            };
            page.assemble(&self.geometry, &textures, page_count, &self.config);
            assembled += 1;
        }

        assembled
    }

    /// Requests a page. Valid pages are `0..=page_count`; `page_count` shows
    /// the back cover.
    pub fn request_page(&mut self, page: usize) -> Result<()> {
        let page_count = self.page_count();
        if page > page_count {
            return Err(FlipbookError::PageOutOfRange { page, page_count });
        }
        log::debug!("Page {page} requested");
        self.progression.request(page);
        Ok(())
    }

    /// Drops any scheduled page step, freezing the displayed page.
    pub fn cancel_pending_step(&mut self) -> bool {
        self.progression.cancel()
    }

    /// Timer domain: lets `elapsed` pass for the page progression.
    pub fn advance_timers(&mut self, elapsed: Duration) -> usize {
        self.progression.advance(elapsed)
    }

    /// Frame domain: animates every assembled page by `delta` seconds.
    pub fn tick_frame(&mut self, delta: f32) {
        let displayed = self.displayed_page();
        let page_count = self.page_count();
        let depth = self.config.page.depth;

        for page in &mut self.pages {
            let pose = PagePose::for_page(page.number(), displayed, page_count);
            page.set_stack_offset(displayed, depth);
            animate_page(page, pose, &self.config.turn, delta);
        }
    }

    /// Runs the timer domain, then the frame domain, for one frame.
    pub fn update(&mut self, delta: Duration) {
        self.advance_timers(delta);
        self.tick_frame(delta.as_secs_f32());
    }

    /// Routes a pointer event aimed at page `number`.
    ///
    /// A click requests a new page, which is returned.
    pub fn handle_pointer(&mut self, number: usize, event: PointerEvent) -> Result<Option<usize>> {
        let page_count = self.page_count();
        if number >= page_count {
            return Err(FlipbookError::PageOutOfRange {
                page: number,
                page_count,
            });
        }

        let opened = self.pose_of(number).opened;
        let requested = self.interaction.handle(number, opened, event);
        if let Some(page) = requested {
            self.request_page(page)?;
        }
        Ok(requested)
    }

    #[must_use]
    pub fn is_highlighted(&self, number: usize) -> bool {
        self.interaction.is_highlighted(number)
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.interaction.cursor()
    }
}
