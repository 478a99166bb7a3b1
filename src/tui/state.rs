/// Marker trait used for managing valid state of UI
pub trait StateMarker {}

#[derive(Default, Debug, Clone, Copy)]
pub struct ViewState;

#[derive(Default, Debug, Clone, Copy)]
pub struct HelpState;

impl StateMarker for ViewState {}
impl StateMarker for HelpState {}

#[derive(Default, Debug, Clone, Copy)]
pub struct App<S: StateMarker> {
    pub should_quit: bool,
    /// Frames rendered since startup, shown in the status line
    pub frames: usize,

    state: std::marker::PhantomData<S>,
}

impl From<App<HelpState>> for App<ViewState> {
    fn from(value: App<HelpState>) -> Self {
        Self {
            should_quit: value.should_quit,
            frames: value.frames,
            state: std::marker::PhantomData::<ViewState>,
        }
    }
}

impl From<App<ViewState>> for App<HelpState> {
    fn from(value: App<ViewState>) -> Self {
        Self {
            should_quit: value.should_quit,
            frames: value.frames,
            state: std::marker::PhantomData::<HelpState>,
        }
    }
}
