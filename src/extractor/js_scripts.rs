//! JavaScript evaluation scripts
//!
//! In-page code used to observe DOM mutations, trigger lazy loading, and
//! collect raw image/text candidates. Each script returns plain JSON so the
//! Rust side can deserialize with serde.

/// Install a MutationObserver counting subtree mutations.
///
/// Idempotent: repeated evaluation reuses the existing observer. The counter
/// is read by [`MUTATION_COUNT_SCRIPT`]; quiescence is decided on the Rust
/// side by polling until the count stops moving.
pub const INSTALL_MUTATION_OBSERVER_SCRIPT: &str = r#"
    (() => {
        if (window.__regattaMutationCount === undefined) {
            window.__regattaMutationCount = 0;
            const observer = new MutationObserver(mutations => {
                window.__regattaMutationCount += mutations.length;
            });
            observer.observe(document.documentElement, {
                childList: true,
                subtree: true,
                attributes: true
            });
        }
        return true;
    })()
"#;

/// Read the current mutation count.
pub const MUTATION_COUNT_SCRIPT: &str = "window.__regattaMutationCount || 0";

/// Scroll to the vertical midpoint of the document.
pub const SCROLL_MIDPOINT_SCRIPT: &str =
    "window.scrollTo(0, document.body.scrollHeight / 2); true";

/// Scroll to the bottom of the document.
pub const SCROLL_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight); true";

/// Collect every `<img>` with its gallery membership and effective width.
///
/// Gallery membership is decided by walking up from the element looking for
/// slider/gallery class names; width is the larger of the rendered box and
/// the natural bitmap width so off-screen lazy images still qualify.
pub const IMAGE_CANDIDATES_SCRIPT: &str = r#"
    (() => {
        const gallerySelector = [
            '.gallery', '.slider', '.carousel', '.swiper',
            '[class*="gallery"]', '[class*="slider"]', '[data-gallery]'
        ].join(', ');

        return Array.from(document.getElementsByTagName('img')).map(img => {
            const rect = img.getBoundingClientRect();
            const width = Math.max(rect.width, img.naturalWidth || 0);
            return {
                src: img.currentSrc || img.src || img.getAttribute('data-src') || '',
                alt: img.alt || '',
                inGallery: img.closest(gallerySelector) !== null,
                width: width
            };
        }).filter(c => c.src.length > 0);
    })()
"#;

/// Collect the first `<h1>` and paragraphs from likely content containers.
///
/// The container set is a site-specific heuristic; pages with none of these
/// containers yield an empty paragraph list and the reconciler falls back to
/// curated text.
pub const DESTINATION_TEXT_SCRIPT: &str = r#"
    (() => {
        const h1 = document.querySelector('h1');
        const containers = [
            'main', 'article', '.content', '.description',
            '.destination-content', '#content'
        ];
        const seen = new Set();
        const paragraphs = [];
        for (const selector of containers) {
            for (const root of document.querySelectorAll(selector)) {
                for (const p of root.querySelectorAll('p')) {
                    const text = (p.textContent || '').trim();
                    if (text.length > 0 && !seen.has(text)) {
                        seen.add(text);
                        paragraphs.push(text);
                    }
                }
            }
        }
        return {
            name: h1 ? (h1.textContent || '').trim() : null,
            paragraphs: paragraphs
        };
    })()
"#;
