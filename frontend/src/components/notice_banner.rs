use crate::state::session::{Notice, NoticeLevel};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct NoticeBannerProps {
    pub notices: Vec<Notice>,
    pub on_dismiss: Callback<usize>,
}

#[function_component(NoticeBanner)]
pub fn notice_banner(props: &NoticeBannerProps) -> Html {
    if props.notices.is_empty() {
        return html! {};
    }

    html! {
        <div class="notices">
            {for props.notices.iter().enumerate().map(|(index, notice)| {
                let class = match notice.level {
                    NoticeLevel::Error => "notice error",
                    NoticeLevel::Warning => "notice warning",
                };
                let on_dismiss = props.on_dismiss.clone();
                html! {
                    <div class={class}>
                        <span>{&notice.message}</span>
                        <button
                            class="notice-dismiss"
                            onclick={Callback::from(move |_: MouseEvent| on_dismiss.emit(index))}
                        >
                            {"×"}
                        </button>
                    </div>
                }
            })}
        </div>
    }
}
