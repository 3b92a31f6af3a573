use crate::app::App;
use crate::mpris::MprisHandle;

pub fn update_mpris(mpris: &MprisHandle, app: &App) {
    let title = app.session.as_ref().map(|s| s.track().name.clone());
    mpris.set_title(title);
    mpris.set_playback(app.playback_state());
}
