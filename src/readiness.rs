use super::driver::EmberDriver;
use super::field_params::FieldParams;
use super::runner::{self, RunHandle};
use super::surface::Surface;
use futures::channel::oneshot;
use log::{info, warn};
use rand::SeedableRng;

// Something that may or may not have a drawing surface available yet.
pub trait SurfaceProvider {
    type Surface: Surface;
    fn acquire(&mut self) -> Option<Self::Surface>;
}

impl<S: Surface, F: FnMut() -> Option<S>> SurfaceProvider for F {
    type Surface = S;
    fn acquire(&mut self) -> Option<S> {
        self()
    }
}

// Retries forever with a fixed delay. A missing surface just means the host
// isn't ready yet.
pub fn poll_for_surface<P: SurfaceProvider>(
    provider: &mut P,
    retry_delay: std::time::Duration,
) -> P::Surface {
    loop {
        if let Some(surface) = provider.acquire() {
            return surface;
        }
        warn!("ember surface not found, retrying...");
        std::thread::sleep(retry_delay);
    }
}

// Blocks on the host's ready signal and then takes the surface. Falls back to
// polling if the signal is dropped or the surface still isn't there.
pub fn wait_for_surface<P: SurfaceProvider>(
    ready: oneshot::Receiver<()>,
    provider: &mut P,
    retry_delay: std::time::Duration,
) -> P::Surface {
    match futures::executor::block_on(ready) {
        Ok(()) => info!("Host signalled ready"),
        Err(oneshot::Canceled) => warn!("Ready signal dropped, falling back to polling"),
    }
    poll_for_surface(provider, retry_delay)
}

// Waits for the surface, then starts the ember loop on it. With a ready
// signal the wait blocks on it, otherwise the provider is polled.
pub fn launch<P>(
    provider: &mut P,
    ready: Option<oneshot::Receiver<()>>,
    params: FieldParams,
) -> RunHandle<P::Surface>
where
    P: SurfaceProvider,
    P::Surface: Send + 'static,
{
    let surface = match ready {
        Some(ready) => wait_for_surface(ready, provider, params.retry_delay()),
        None => poll_for_surface(provider, params.retry_delay()),
    };
    info!("Launching ember field");
    let driver = EmberDriver::new(surface, params, rand::rngs::StdRng::from_entropy());
    runner::spawn(driver)
}
