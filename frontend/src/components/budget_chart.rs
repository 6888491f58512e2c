use crate::services::chart_data::BudgetChartData;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

const CANVAS_WIDTH: u32 = 640;
const CANVAS_HEIGHT: u32 = 400;

#[derive(Properties, PartialEq)]
pub struct BudgetChartProps {
    pub data: BudgetChartData,
}

pub struct BudgetChart {
    canvas_ref: NodeRef,
}

impl Component for BudgetChart {
    type Message = ();
    type Properties = BudgetChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        ctx.props().data != old_props.data
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(&ctx.props().data);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let data = &ctx.props().data;

        html! {
            <div class="chart-container">
                <h3>{"Budget Breakdown"}</h3>
                {if data.is_drawable() {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="budget-chart-canvas"
                            width={CANVAS_WIDTH.to_string()}
                            height={CANVAS_HEIGHT.to_string()}
                        ></canvas>
                    }
                } else {
                    html! {
                        <div class="chart-empty">
                            <p>{"Nothing to chart yet"}</p>
                        </div>
                    }
                }}
                <ul class="chart-legend">
                    {for data.slices.iter().map(|slice| {
                        let (r, g, b) = slice.color;
                        html! {
                            <li>
                                <span
                                    class="legend-swatch"
                                    style={format!("background: rgb({}, {}, {});", r, g, b)}
                                ></span>
                                {format!("{}: {:.2}", slice.label, slice.value)}
                            </li>
                        }
                    })}
                </ul>
            </div>
        }
    }
}

impl BudgetChart {
    fn draw_chart(&self, data: &BudgetChartData) {
        if !data.is_drawable() {
            return;
        }

        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };

        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        // Empty slices would stack their labels on top of each other
        let mut sizes = Vec::new();
        let mut colors = Vec::new();
        let mut labels = Vec::new();
        for (slice, size) in data.slices.iter().zip(data.drawable_values()) {
            if size > 0.0 {
                sizes.push(size);
                colors.push(RGBColor(slice.color.0, slice.color.1, slice.color.2));
                labels.push(slice.label);
            }
        }

        let (width, height) = root.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 14).into_font().color(&BLACK));
        pie.percentages(("sans-serif", 12).into_font().color(&WHITE));

        if root.draw(&pie).is_err() {
            log::warn!(target: "chart", "failed to draw budget chart");
            return;
        }

        let _ = root.present();
    }
}
