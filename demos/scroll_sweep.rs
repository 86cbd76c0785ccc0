use stratus::{
    Choreographer, ChoreographerOpts, GeometrySource, InMemorySink, PanelRect, Scene, TickHost,
};

struct Page {
    scroll: f64,
}

impl GeometrySource for Page {
    fn viewport_size(&self) -> (f64, f64) {
        (1280.0, 720.0)
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll
    }

    fn panel_rect(&self, panel: &str) -> Option<PanelRect> {
        let doc_top = match panel {
            "hero" => 0.0,
            "midway" => 720.0,
            _ => return None,
        };
        Some(PanelRect {
            top: doc_top - self.scroll,
            height: 720.0,
        })
    }
}

struct ImmediateHost;

impl TickHost for ImmediateHost {
    fn request_frame(&mut self) {}
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/hero_clouds.json");
    let scene = Scene::from_reader(s.as_bytes())?;
    scene.validate()?;

    let mut choreographer = Choreographer::new(&scene, ChoreographerOpts::default())?;
    let mut page = Page { scroll: 0.0 };
    let mut host = ImmediateHost;
    let mut sink = InMemorySink::new();

    for scroll in [0.0, 180.0, 360.0, 540.0, 720.0, 1080.0] {
        page.scroll = scroll;
        choreographer.notify_scroll(&mut host);
        choreographer.on_frame(&page, &mut sink)?;

        let frame = sink.last().expect("frame emitted");
        println!("scroll {scroll}:");
        for g in &frame.globals {
            println!(
                "  {:8} scale {:.3} opacity {:.3} translate ({:.1}, {:.1})",
                choreographer.global_id(g.global),
                g.scale,
                g.opacity,
                g.translate.x,
                g.translate.y
            );
        }
        for l in &frame.layers {
            println!(
                "  {:8} at ({:.1}, {:.1}) offset ({:.1}, {:.1}) opacity {:.3}",
                choreographer.layer_id(l.layer),
                l.anchor.x,
                l.anchor.y,
                l.offset.x,
                l.offset.y,
                l.opacity
            );
        }
    }

    Ok(())
}
