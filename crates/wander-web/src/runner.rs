use wander_engine::{
    DrawList, FrameData, InputEvent, InputQueue, Renderer, SheetInfo, SpriteKey, Stage,
    StageConfig,
};

/// Owns a stage and a drawing backend and runs the frame loop between them.
///
/// The web bridge keeps one of these in a `thread_local!` and calls `tick`
/// from `requestAnimationFrame`. Generic over the backend so the loop can be
/// exercised natively with a recording renderer.
pub struct StageRunner<R: Renderer> {
    stage: Stage,
    renderer: R,
    input: InputQueue,
    draw_list: DrawList,
    /// Size last handed to the backend.
    surface: (u32, u32),
    running: bool,
}

impl<R: Renderer> StageRunner<R> {
    pub fn new(config: StageConfig, renderer: R, width: f32, height: f32) -> Self {
        Self {
            stage: Stage::new(config, width, height),
            renderer,
            input: InputQueue::new(),
            draw_list: DrawList::new(),
            surface: (width as u32, height as u32),
            running: true,
        }
    }

    /// Queue a host event for the next tick. A resize that changes the
    /// surface reaches the backend immediately so it is ready before the
    /// next draw.
    pub fn push_input(&mut self, event: InputEvent) {
        if let InputEvent::Resize { width, height } = event {
            let size = (width as u32, height as u32);
            if size != self.surface {
                self.surface = size;
                self.renderer.resize(size.0, size.1);
            }
        }
        self.input.push(event);
    }

    pub fn add_sheet(&mut self, key: SpriteKey, info: SheetInfo) {
        self.stage.add_sheet(key, info);
    }

    /// Called once every sheet has loaded or failed.
    pub fn finish_loading(&mut self) {
        self.stage.fill_population();
    }

    /// Run one host frame: apply input, catch up on fixed ticks, draw.
    pub fn tick(&mut self, dt: f32) {
        if !self.running {
            return;
        }

        self.stage.handle_input(&mut self.input);

        let steps = self.stage.clock_mut().accumulate(dt);
        if steps == 0 {
            self.stage.render(&mut self.draw_list);
        } else {
            for _ in 1..steps {
                self.stage.step();
            }
            self.stage.frame(&mut self.draw_list);
        }

        self.present();
    }

    /// Draw the current state without advancing it.
    pub fn redraw(&mut self) {
        if !self.running {
            return;
        }
        self.stage.render(&mut self.draw_list);
        self.present();
    }

    fn present(&mut self) {
        let projection = self.stage.projection();
        let frame = FrameData {
            draw_list: &self.draw_list,
            width: projection.width,
            height: projection.height,
        };
        self.renderer.draw(&frame);
    }

    /// Stop the loop; further ticks are ignored.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!(
                "stage stopped after {} ticks ({} backend)",
                self.stage.clock().ticks(),
                self.renderer.backend()
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
